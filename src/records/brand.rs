//! Brand records. The brand screen runs client-cached: one bulk fetch,
//! then search filters the cache across name, description, and slug.

use serde::{Deserialize, Serialize};

use crate::endpoint::http::RestResource;
use crate::form::{FieldSpec, FormSpec};
use crate::types::{Filterable, FilterValue, Timestamps};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Brand {
    #[serde(rename = "_id")]
    pub id: String,
    pub brand_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub slug: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Filterable for Brand {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.brand_name, self.description, self.slug)
    }

    fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "slug" => Some(FilterValue::Text(self.slug.clone())),
            _ => None,
        }
    }
}

impl RestResource for Brand {
    const COLLECTION: &'static str = "brands";
    type Draft = BrandDraft;
}

/// Create/edit payload for a brand.
#[derive(Debug, Clone, Serialize)]
pub struct BrandDraft {
    pub brand_name: String,
    pub description: String,
    pub slug: String,
}

/// Rules for the brand create/edit modal.
pub fn form_spec() -> FormSpec {
    FormSpec::new(vec![
        FieldSpec::new("brand_name", "Brand name")
            .required()
            .min_len(2)
            .max_len(50),
        FieldSpec::new("description", "Description")
            .required()
            .max_len(500),
        FieldSpec::new("slug", "Slug").required().min_len(2).max_len(50),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{
            "_id": "65f1c2",
            "brand_name": "Acme",
            "description": "Industrial supplies",
            "slug": "acme",
            "createdAt": "2024-03-01T08:30:00Z",
            "updatedAt": "2024-03-02T09:00:00Z"
        }"#;
        let brand: Brand = serde_json::from_str(json).unwrap();
        assert_eq!(brand.id, "65f1c2");
        assert_eq!(brand.brand_name, "Acme");
    }

    #[test]
    fn test_search_text_covers_name_description_slug() {
        let brand: Brand = serde_json::from_str(
            r#"{
                "_id": "1", "brand_name": "Acme", "description": "Widgets",
                "slug": "acme-co",
                "createdAt": "2024-03-01T08:30:00Z",
                "updatedAt": "2024-03-01T08:30:00Z"
            }"#,
        )
        .unwrap();
        let text = brand.search_text().to_lowercase();
        assert!(text.contains("acme"));
        assert!(text.contains("widgets"));
        assert!(text.contains("acme-co"));
    }

    #[test]
    fn test_form_spec_rejects_short_name() {
        let draft = serde_json::json!({
            "brand_name": "A",
            "description": "d",
            "slug": "aa"
        });
        let errs = form_spec().validate(&draft).unwrap_err();
        assert_eq!(errs.errors.len(), 1);
        assert_eq!(errs.errors[0].field, "brand_name");
    }
}
