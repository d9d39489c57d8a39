//! roster — searchable, paginated, filterable collection state for admin
//! consoles.
//!
//! Every admin table screen repeats the same lifecycle: fetch a page of
//! records, filter/search them, open a modal form, submit, refetch. This
//! crate centralizes that lifecycle in [`ListController`], with a pluggable
//! [`CollectionEndpoint`] for the backend, per-record form rules, and the
//! shared formatting glue.

pub mod config;
pub mod controller;
pub mod display;
pub mod endpoint;
pub mod error;
pub mod form;
pub mod query;
pub mod records;
pub mod types;

pub use config::ListConfig;
pub use controller::ListController;
pub use endpoint::http::{HttpEndpoint, RestResource};
pub use endpoint::{CollectionEndpoint, ListPage, ListQuery, Session};
pub use error::{Result, RosterError};
pub use form::{FieldRule, FieldSpec, FormErrors, FormSpec};
pub use query::{FetchMode, QueryPatch, QueryState, ResultSet};
pub use types::{Filterable, FilterValue, Timestamps};
