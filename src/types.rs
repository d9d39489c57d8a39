//! Core shared types: filter values, the `Filterable` trait, timestamps.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A value an active filter compares against.
///
/// Filter matching is exact equality; case-insensitive substring matching
/// is reserved for search text. `Flag(false)` is a real, active filter —
/// activity is tracked by a filter's *presence* in the query, never by
/// whether its value is falsy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Flag(bool),
    Number(f64),
}

impl FilterValue {
    /// Render the value the way it appears in a request query string.
    pub fn as_param(&self) -> String {
        match self {
            FilterValue::Text(s) => s.clone(),
            FilterValue::Flag(b) => b.to_string(),
            FilterValue::Number(n) => {
                // Integral numbers print without a trailing ".0" so
                // `rating=4` round-trips the way the backend expects.
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Flag(b)
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

/// A record the controller can search, filter, and key by id.
///
/// The controller is otherwise schema-free: it never looks at a record
/// beyond these three accessors.
pub trait Filterable {
    /// Unique identifier within the collection.
    fn id(&self) -> &str;

    /// Concatenation of the fields search text is matched against.
    /// Matching is case-insensitive substring, so implementations only
    /// decide *which* fields participate, not how.
    fn search_text(&self) -> String;

    /// Look up a named filterable field. `None` means the record has no
    /// such field, which never satisfies an active filter on that name.
    fn field(&self, name: &str) -> Option<FilterValue>;
}

/// Created/updated timestamp pair carried by every backend record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
    #[serde(rename = "updatedAt")]
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_value_param_rendering() {
        assert_eq!(FilterValue::Text("active".into()).as_param(), "active");
        assert_eq!(FilterValue::Flag(false).as_param(), "false");
        assert_eq!(FilterValue::Number(4.0).as_param(), "4");
        assert_eq!(FilterValue::Number(0.5).as_param(), "0.5");
    }

    #[test]
    fn test_filter_value_equality() {
        assert_eq!(FilterValue::Flag(false), FilterValue::Flag(false));
        assert_ne!(FilterValue::Flag(false), FilterValue::Flag(true));
        assert_ne!(
            FilterValue::Text("false".into()),
            FilterValue::Flag(false),
            "a text filter never equals a boolean filter"
        );
    }

    #[test]
    fn test_timestamps_deserialize_iso8601() {
        let json = r#"{"createdAt":"2024-03-01T08:30:00Z","updatedAt":"2024-03-02T09:00:00Z"}"#;
        let ts: Timestamps = serde_json::from_str(json).unwrap();
        assert!(ts.updated_at > ts.created_at);
    }
}
