//! Domain records for each admin collection.
//!
//! One module per managed collection. Each record type carries its REST
//! binding ([`RestResource`](crate::endpoint::http::RestResource)), its
//! filter/search surface ([`Filterable`](crate::types::Filterable)), a
//! draft type for create/edit payloads, and the form rule set its modal
//! uses. The module docs note which fetch mode the collection's console
//! screen traditionally runs in; the choice stays per-instance
//! configuration.

pub mod brand;
pub mod coupon;
pub mod review;
pub mod setting;
pub mod shipping;
pub mod tech_news;
pub mod vendor;

pub use brand::{Brand, BrandDraft};
pub use coupon::{Coupon, CouponDraft, CouponKind};
pub use review::{EntityRef, Review, ReviewDraft};
pub use setting::{Setting, SettingDraft, SettingKind};
pub use shipping::{Shipping, ShippingDraft, ShippingStatus};
pub use tech_news::{TechNews, TechNewsDraft};
pub use vendor::{Vendor, VendorAddress, VendorDraft, VendorStatus};
