//! Site settings. A small collection, client-cached; search covers key,
//! group, and description, and the group dropdown filters locally.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::endpoint::http::RestResource;
use crate::form::{FieldSpec, FormSpec};
use crate::types::{Filterable, FilterValue, Timestamps};

/// Declared type of a setting's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SettingKind::String => "string",
            SettingKind::Number => "number",
            SettingKind::Boolean => "boolean",
            SettingKind::Object => "object",
            SettingKind::Array => "array",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    #[serde(rename = "_id")]
    pub id: String,
    pub key: String,
    pub value: Value,
    #[serde(rename = "type")]
    pub kind: SettingKind,
    pub group: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Filterable for Setting {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.key,
            self.group,
            self.description.as_deref().unwrap_or("")
        )
    }

    fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "group" => Some(FilterValue::Text(self.group.clone())),
            "type" => Some(FilterValue::Text(self.kind.to_string())),
            "isPublic" => Some(FilterValue::Flag(self.is_public)),
            _ => None,
        }
    }
}

impl RestResource for Setting {
    const COLLECTION: &'static str = "settings";
    type Draft = SettingDraft;
}

/// Create/edit payload for a setting.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingDraft {
    pub key: String,
    pub value: Value,
    #[serde(rename = "type")]
    pub kind: SettingKind,
    pub group: String,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Rules for the setting create/edit modal.
pub fn form_spec() -> FormSpec {
    FormSpec::new(vec![
        FieldSpec::new("key", "Key").required().min_len(2).max_len(100),
        FieldSpec::new("value", "Value").required(),
        FieldSpec::new("type", "Type").required(),
        FieldSpec::new("group", "Group").required().max_len(50),
        FieldSpec::new("description", "Description").max_len(500),
    ])
}
