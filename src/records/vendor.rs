//! Vendor records. Server-paged; the status dropdown (pending/active/
//! suspended) is forwarded as a filter parameter.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::endpoint::http::RestResource;
use crate::form::{FieldSpec, FormSpec};
use crate::types::{Filterable, FilterValue, Timestamps};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex should be valid"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 .-]{7,14}$").expect("phone regex should be valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorStatus {
    Pending,
    Active,
    Suspended,
}

impl VendorStatus {
    pub fn label(self) -> &'static str {
        match self {
            VendorStatus::Pending => "Pending",
            VendorStatus::Active => "Active",
            VendorStatus::Suspended => "Suspended",
        }
    }
}

impl fmt::Display for VendorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VendorStatus::Pending => "pending",
            VendorStatus::Active => "active",
            VendorStatus::Suspended => "suspended",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorAddress {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub ward: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(rename = "_id")]
    pub id: String,
    pub company_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    pub address: VendorAddress,
    pub contact_phone: String,
    pub contact_email: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub social_links: BTreeMap<String, String>,
    #[serde(default)]
    pub rating: f64,
    pub status: VendorStatus,
    /// Id of the owning user account.
    pub user: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Filterable for Vendor {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.company_name, self.contact_email, self.address.city
        )
    }

    fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "status" => Some(FilterValue::Text(self.status.to_string())),
            "city" => Some(FilterValue::Text(self.address.city.clone())),
            _ => None,
        }
    }
}

impl RestResource for Vendor {
    const COLLECTION: &'static str = "vendors";
    type Draft = VendorDraft;
}

/// Create/edit payload for a vendor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorDraft {
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub address: VendorAddress,
    pub contact_phone: String,
    pub contact_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub social_links: BTreeMap<String, String>,
    pub status: VendorStatus,
    pub user: String,
}

/// Rules for the vendor create/edit modal.
pub fn form_spec() -> FormSpec {
    FormSpec::new(vec![
        FieldSpec::new("companyName", "Company name")
            .required()
            .min_len(2)
            .max_len(100),
        FieldSpec::new("contactEmail", "Contact email")
            .required()
            .pattern(EMAIL_RE.clone(), "a valid email address"),
        FieldSpec::new("contactPhone", "Contact phone")
            .required()
            .pattern(PHONE_RE.clone(), "a valid phone number"),
        FieldSpec::new("description", "Description").max_len(1000),
        FieldSpec::new("status", "Status").required(),
        FieldSpec::new("user", "Owner account").required(),
    ])
}
