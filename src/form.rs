//! Declarative form validation for create/edit modals.
//!
//! Each record module publishes a `FormSpec` with the rule list for its
//! create/edit modal. Validation is strictly form-local: the list
//! controller never sees these errors, it only sees `invalidate()` after
//! a successful submit.
//!
//! Draft values are validated as a JSON object, the same shape the HTTP
//! endpoint submits, so the rules apply identically regardless of which
//! record type produced the draft.

use std::fmt;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// One rule attached to one field.
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Field must be present and non-empty (whitespace-only counts as
    /// empty for strings).
    Required,
    /// Minimum length in characters, applied to string fields.
    MinLen(usize),
    /// Maximum length in characters, applied to string fields.
    MaxLen(usize),
    /// String must match the regex; `hint` is the user-facing description
    /// of the expected shape.
    Pattern(Regex, &'static str),
    /// Numeric bounds, inclusive on both ends.
    Range { min: f64, max: f64 },
}

/// Rules for a single named field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Label used in error messages (e.g. "Brand name", not "brand_name").
    pub label: &'static str,
    pub rules: Vec<FieldRule>,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            rules: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.rules.push(FieldRule::Required);
        self
    }

    pub fn min_len(mut self, n: usize) -> Self {
        self.rules.push(FieldRule::MinLen(n));
        self
    }

    pub fn max_len(mut self, n: usize) -> Self {
        self.rules.push(FieldRule::MaxLen(n));
        self
    }

    pub fn pattern(mut self, re: Regex, hint: &'static str) -> Self {
        self.rules.push(FieldRule::Pattern(re, hint));
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.rules.push(FieldRule::Range { min, max });
        self
    }
}

/// A single failed rule on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field errors from one validation pass. The modal shows every
/// failing field at once, so validation never stops at the first error.
#[derive(Debug, Clone, Error)]
pub struct FormErrors {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", joined.join("; "))
    }
}

/// The full rule set for one record's create/edit form.
#[derive(Debug, Clone, Default)]
pub struct FormSpec {
    fields: Vec<FieldSpec>,
}

impl FormSpec {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Validate a draft object against every rule of every field,
    /// collecting all failures.
    pub fn validate(&self, draft: &Value) -> Result<(), FormErrors> {
        let mut errors = Vec::new();

        for field in &self.fields {
            let value = draft.get(field.name);
            for rule in &field.rules {
                if let Some(message) = check_rule(rule, field.label, value) {
                    errors.push(FieldError {
                        field: field.name.to_string(),
                        message,
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FormErrors { errors })
        }
    }
}

/// Evaluate one rule, returning the failure message if it does not hold.
///
/// Length and pattern rules are skipped on absent/non-string values
/// rather than double-reported: `Required` already covers absence, and an
/// optional field left blank must not trip its length rules.
fn check_rule(rule: &FieldRule, label: &str, value: Option<&Value>) -> Option<String> {
    match rule {
        FieldRule::Required => {
            let missing = match value {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            };
            missing.then(|| format!("{label} is required"))
        }
        FieldRule::MinLen(n) => {
            let s = value?.as_str()?;
            if s.is_empty() {
                return None;
            }
            (s.chars().count() < *n).then(|| format!("{label} must be at least {n} characters"))
        }
        FieldRule::MaxLen(n) => {
            let s = value?.as_str()?;
            (s.chars().count() > *n).then(|| format!("{label} must not exceed {n} characters"))
        }
        FieldRule::Pattern(re, hint) => {
            let s = value?.as_str()?;
            if s.is_empty() {
                return None;
            }
            (!re.is_match(s)).then(|| format!("{label} must be {hint}"))
        }
        FieldRule::Range { min, max } => {
            let n = value?.as_f64()?;
            (n < *min || n > *max)
                .then(|| format!("{label} must be between {min} and {max}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn brand_like_spec() -> FormSpec {
        FormSpec::new(vec![
            FieldSpec::new("brand_name", "Brand name")
                .required()
                .min_len(2)
                .max_len(50),
            FieldSpec::new("description", "Description")
                .required()
                .max_len(500),
            FieldSpec::new("slug", "Slug")
                .required()
                .min_len(2)
                .max_len(50),
        ])
    }

    #[test]
    fn test_valid_draft_passes() {
        let spec = brand_like_spec();
        let draft = json!({
            "brand_name": "Acme",
            "description": "Industrial supplies",
            "slug": "acme",
        });
        assert!(spec.validate(&draft).is_ok());
    }

    #[test]
    fn test_all_failures_reported_at_once() {
        let spec = brand_like_spec();
        let draft = json!({ "brand_name": "A" });
        let errs = spec.validate(&draft).unwrap_err();
        let fields: Vec<&str> = errs.errors.iter().map(|e| e.field.as_str()).collect();
        // brand_name too short + description missing + slug missing
        assert_eq!(fields, vec!["brand_name", "description", "slug"]);
    }

    #[test]
    fn test_whitespace_only_fails_required() {
        let spec = FormSpec::new(vec![FieldSpec::new("title", "Title").required()]);
        let errs = spec.validate(&json!({ "title": "   " })).unwrap_err();
        assert_eq!(errs.errors[0].message, "Title is required");
    }

    #[test]
    fn test_optional_blank_field_skips_length_rules() {
        let spec = FormSpec::new(vec![FieldSpec::new("website", "Website").min_len(4)]);
        assert!(spec.validate(&json!({})).is_ok());
        assert!(spec.validate(&json!({ "website": "" })).is_ok());
        assert!(spec.validate(&json!({ "website": "ab" })).is_err());
    }

    #[test]
    fn test_range_rule() {
        let spec = FormSpec::new(vec![
            FieldSpec::new("rating", "Rating").required().range(1.0, 5.0),
        ]);
        assert!(spec.validate(&json!({ "rating": 5 })).is_ok());
        let errs = spec.validate(&json!({ "rating": 6 })).unwrap_err();
        assert_eq!(errs.errors[0].message, "Rating must be between 1 and 5");
    }

    #[test]
    fn test_pattern_rule() {
        let re = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
        let spec = FormSpec::new(vec![
            FieldSpec::new("slug", "Slug").pattern(re, "lowercase letters, digits and hyphens"),
        ]);
        assert!(spec.validate(&json!({ "slug": "tech-news-7" })).is_ok());
        let errs = spec.validate(&json!({ "slug": "Tech News" })).unwrap_err();
        assert!(errs.errors[0].message.contains("lowercase"));
    }

    #[test]
    fn test_form_errors_display_joins_messages() {
        let errs = FormErrors {
            errors: vec![
                FieldError {
                    field: "a".into(),
                    message: "A is required".into(),
                },
                FieldError {
                    field: "b".into(),
                    message: "B is required".into(),
                },
            ],
        };
        assert_eq!(errs.to_string(), "a: A is required; b: B is required");
    }
}
