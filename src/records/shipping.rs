//! Shipping records. Server-paged; the status dropdown is forwarded to
//! the backend as a filter parameter.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::endpoint::http::RestResource;
use crate::form::{FieldSpec, FormSpec};
use crate::types::{Filterable, FilterValue, Timestamps};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingStatus {
    Processing,
    Shipped,
    Delivered,
    Failed,
}

impl ShippingStatus {
    /// Human-readable label for table cells and status badges.
    pub fn label(self) -> &'static str {
        match self {
            ShippingStatus::Processing => "Processing",
            ShippingStatus::Shipped => "Shipped",
            ShippingStatus::Delivered => "Delivered",
            ShippingStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for ShippingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShippingStatus::Processing => "processing",
            ShippingStatus::Shipped => "shipped",
            ShippingStatus::Delivered => "delivered",
            ShippingStatus::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipping {
    #[serde(rename = "_id")]
    pub id: String,
    pub carrier: String,
    #[serde(default)]
    pub tracking_number: Option<String>,
    pub status: ShippingStatus,
    #[serde(default)]
    pub estimated_delivery: Option<Timestamp>,
    #[serde(default)]
    pub actual_delivery: Option<Timestamp>,
    pub shipping_method: String,
    pub shipping_fee: f64,
    /// Id of the order this shipment belongs to.
    pub order: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Filterable for Shipping {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.carrier,
            self.tracking_number.as_deref().unwrap_or(""),
            self.shipping_method
        )
    }

    fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "status" => Some(FilterValue::Text(self.status.to_string())),
            "carrier" => Some(FilterValue::Text(self.carrier.clone())),
            _ => None,
        }
    }
}

impl RestResource for Shipping {
    const COLLECTION: &'static str = "shippings";
    type Draft = ShippingDraft;
}

/// Create/edit payload for a shipment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDraft {
    pub carrier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    pub status: ShippingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_delivery: Option<Timestamp>,
    pub shipping_method: String,
    pub shipping_fee: f64,
    pub order: String,
}

/// Rules for the shipping create/edit modal.
pub fn form_spec() -> FormSpec {
    FormSpec::new(vec![
        FieldSpec::new("carrier", "Carrier").required().max_len(100),
        FieldSpec::new("trackingNumber", "Tracking number").max_len(100),
        FieldSpec::new("status", "Status").required(),
        FieldSpec::new("shippingMethod", "Shipping method")
            .required()
            .max_len(100),
        FieldSpec::new("shippingFee", "Shipping fee")
            .required()
            .range(0.0, 100_000_000.0),
        FieldSpec::new("order", "Order").required(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{
            "_id": "sh1",
            "carrier": "GHN",
            "trackingNumber": "GHN123456",
            "status": "shipped",
            "estimatedDelivery": "2024-03-07T00:00:00Z",
            "shippingMethod": "express",
            "shippingFee": 35000,
            "order": "o-42",
            "createdAt": "2024-03-01T08:30:00Z",
            "updatedAt": "2024-03-02T08:30:00Z"
        }"#;
        let shipping: Shipping = serde_json::from_str(json).unwrap();
        assert_eq!(shipping.status, ShippingStatus::Shipped);
        assert!(shipping.actual_delivery.is_none());
        assert_eq!(
            shipping.field("status"),
            Some(FilterValue::Text("shipped".to_string()))
        );
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ShippingStatus::Processing.label(), "Processing");
        assert_eq!(ShippingStatus::Failed.to_string(), "failed");
    }
}
