//! Coupon records. Client-cached like brands; the coupon screen filters
//! the cache by code substring (search), discount kind, and active state.
//! Filtering for inactive coupons sets `isActive` to `Flag(false)`, which
//! must stay distinguishable from the filter being off.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::endpoint::http::RestResource;
use crate::form::{FieldSpec, FormSpec};
use crate::types::{Filterable, FilterValue, Timestamps};

/// Discount kind: percentage off or a fixed amount off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponKind {
    Percentage,
    Fixed,
}

impl fmt::Display for CouponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CouponKind::Percentage => write!(f, "percentage"),
            CouponKind::Fixed => write!(f, "fixed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(rename = "_id")]
    pub id: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: CouponKind,
    pub value: f64,
    #[serde(default)]
    pub min_purchase: f64,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    #[serde(default)]
    pub usage_limit: u64,
    #[serde(default)]
    pub usage_count: u64,
    pub is_active: bool,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Filterable for Coupon {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> String {
        self.code.clone()
    }

    fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "type" => Some(FilterValue::Text(self.kind.to_string())),
            "isActive" => Some(FilterValue::Flag(self.is_active)),
            _ => None,
        }
    }
}

impl RestResource for Coupon {
    const COLLECTION: &'static str = "coupons";
    type Draft = CouponDraft;
}

/// Create/edit payload for a coupon.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponDraft {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: CouponKind,
    pub value: f64,
    pub min_purchase: f64,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub usage_limit: u64,
    pub is_active: bool,
}

/// Rules for the coupon create/edit modal.
pub fn form_spec() -> FormSpec {
    FormSpec::new(vec![
        FieldSpec::new("code", "Coupon code")
            .required()
            .min_len(3)
            .max_len(20),
        FieldSpec::new("type", "Discount type").required(),
        FieldSpec::new("value", "Discount value")
            .required()
            .range(0.0, 100_000_000.0),
        FieldSpec::new("minPurchase", "Minimum purchase").range(0.0, 1_000_000_000.0),
        FieldSpec::new("startDate", "Start date").required(),
        FieldSpec::new("endDate", "End date").required(),
        FieldSpec::new("usageLimit", "Usage limit").range(0.0, 1_000_000.0),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Coupon {
        serde_json::from_str(
            r#"{
                "_id": "c1",
                "code": "SUMMER15",
                "type": "percentage",
                "value": 15,
                "minPurchase": 200000,
                "startDate": "2024-06-01T00:00:00Z",
                "endDate": "2024-08-31T23:59:59Z",
                "usageLimit": 100,
                "usageCount": 7,
                "isActive": false,
                "createdAt": "2024-05-20T08:00:00Z",
                "updatedAt": "2024-05-21T08:00:00Z"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deserialize_backend_shape() {
        let coupon = sample();
        assert_eq!(coupon.kind, CouponKind::Percentage);
        assert_eq!(coupon.usage_count, 7);
        assert!(!coupon.is_active);
    }

    #[test]
    fn test_inactive_coupon_matches_false_flag_filter() {
        let coupon = sample();
        assert_eq!(coupon.field("isActive"), Some(FilterValue::Flag(false)));
        assert_eq!(
            coupon.field("type"),
            Some(FilterValue::Text("percentage".to_string()))
        );
    }

    #[test]
    fn test_draft_serializes_camel_case() {
        let coupon = sample();
        let draft = CouponDraft {
            code: coupon.code,
            kind: coupon.kind,
            value: coupon.value,
            min_purchase: coupon.min_purchase,
            start_date: coupon.start_date,
            end_date: coupon.end_date,
            usage_limit: coupon.usage_limit,
            is_active: true,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["type"], "percentage");
        assert!(json.get("minPurchase").is_some());
        assert!(json.get("isActive").is_some());
    }
}
