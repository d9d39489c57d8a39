//! Review records. Server-paged: the population is too large to bulk
//! fetch, so every query change hits the backend.
//!
//! The backend sometimes populates the `product`/`user` refs into full
//! objects and sometimes leaves them as bare ids; [`EntityRef`] accepts
//! both shapes.

use serde::{Deserialize, Serialize};

use crate::endpoint::http::RestResource;
use crate::form::{FieldSpec, FormSpec};
use crate::types::{Filterable, FilterValue, Timestamps};

/// A reference to another entity, either a bare id or a populated object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Populated(PopulatedRef),
    Id(String),
}

/// The populated shape: id plus whatever display field the backend joins
/// in (`name` for products, `userName` for users).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PopulatedRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, alias = "name", alias = "userName")]
    pub label: Option<String>,
}

impl EntityRef {
    pub fn id(&self) -> &str {
        match self {
            EntityRef::Populated(populated) => &populated.id,
            EntityRef::Id(id) => id,
        }
    }

    /// Display label when populated, falling back to the id.
    pub fn label(&self) -> &str {
        match self {
            EntityRef::Populated(populated) => populated.label.as_deref().unwrap_or(&populated.id),
            EntityRef::Id(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    pub rating: u8,
    #[serde(default)]
    pub title: Option<String>,
    pub comment: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_verified: bool,
    pub product: EntityRef,
    pub user: EntityRef,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Filterable for Review {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.title.as_deref().unwrap_or(""), self.comment)
    }

    fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "rating" => Some(FilterValue::Number(f64::from(self.rating))),
            "isVerified" => Some(FilterValue::Flag(self.is_verified)),
            _ => None,
        }
    }
}

impl RestResource for Review {
    const COLLECTION: &'static str = "reviews";
    type Draft = ReviewDraft;
}

/// Create/edit payload for a review.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub comment: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    pub is_verified: bool,
    pub product: String,
    pub user: String,
}

/// Rules for the review create/edit modal.
pub fn form_spec() -> FormSpec {
    FormSpec::new(vec![
        FieldSpec::new("rating", "Rating").required().range(1.0, 5.0),
        FieldSpec::new("title", "Title").max_len(200),
        FieldSpec::new("comment", "Comment").required().max_len(2000),
        FieldSpec::new("product", "Product").required(),
        FieldSpec::new("user", "User").required(),
    ])
}
