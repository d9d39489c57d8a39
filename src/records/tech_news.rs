//! Tech-news articles. Server-paged, and the one collection whose backend
//! accepts a server-side search parameter (`title`), so search text is
//! forwarded with each page request instead of filtered locally.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::endpoint::http::RestResource;
use crate::form::{FieldSpec, FormSpec};
use crate::types::{Filterable, FilterValue, Timestamps};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechNews {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub keyword: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub description: String,
    pub content: String,
    /// Publication date shown on the article, distinct from the storage
    /// timestamps.
    pub date: Timestamp,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Filterable for TechNews {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.title, self.keyword, self.description)
    }

    fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "keyword" => Some(FilterValue::Text(self.keyword.clone())),
            _ => None,
        }
    }
}

impl RestResource for TechNews {
    const COLLECTION: &'static str = "technews";
    const SEARCH_PARAM: Option<&'static str> = Some("title");
    type Draft = TechNewsDraft;
}

/// Create/edit payload for an article.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechNewsDraft {
    pub title: String,
    pub keyword: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub description: String,
    pub content: String,
    pub date: Timestamp,
}

/// Rules for the article create/edit modal.
pub fn form_spec() -> FormSpec {
    FormSpec::new(vec![
        FieldSpec::new("title", "Title").required().min_len(5).max_len(200),
        FieldSpec::new("keyword", "Keyword").required().max_len(100),
        FieldSpec::new("description", "Description")
            .required()
            .max_len(500),
        FieldSpec::new("content", "Content").required(),
        FieldSpec::new("date", "Publication date").required(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{
            "_id": "t1",
            "title": "New GPU generation announced",
            "keyword": "gpu",
            "description": "Summary",
            "content": "Full article body",
            "date": "2024-03-05T00:00:00Z",
            "createdAt": "2024-03-01T08:30:00Z",
            "updatedAt": "2024-03-01T08:30:00Z"
        }"#;
        let article: TechNews = serde_json::from_str(json).unwrap();
        assert_eq!(article.keyword, "gpu");
        assert!(article.thumbnail.is_none());
    }

    #[test]
    fn test_search_param_is_title() {
        assert_eq!(TechNews::SEARCH_PARAM, Some("title"));
    }
}
