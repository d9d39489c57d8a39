//! Remote collection endpoint abstraction.
//!
//! The controller talks to a collection through [`CollectionEndpoint`]
//! regardless of transport. The one production implementation is the
//! REST-backed [`HttpEndpoint`](http::HttpEndpoint); tests substitute
//! in-memory fakes.

pub mod http;

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::error::Result;
use crate::types::FilterValue;

/// An authenticated session, passed explicitly to the endpoint.
///
/// Credentials are an input, never ambient state: the controller stays
/// testable without a live session singleton, and the token cannot leak
/// through `Debug` output.
#[derive(Clone)]
pub struct Session {
    access_token: SecretString,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::from(access_token.into()),
        }
    }

    /// The `Authorization` header value for this session.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token.expose_secret())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// One page request against a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    /// 1-based page index.
    pub page: u32,
    pub page_size: u32,
    /// Search text, forwarded server-side when the collection supports it.
    pub search_text: Option<String>,
    /// Active filters by name.
    pub filters: BTreeMap<String, FilterValue>,
}

impl ListQuery {
    /// A plain page request with no search or filters, used for the bulk
    /// fetch that fills a client-side cache.
    pub fn page(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            search_text: None,
            filters: BTreeMap::new(),
        }
    }
}

/// One page of records plus the size of the full matching population.
#[derive(Debug, Clone)]
pub struct ListPage<R> {
    pub items: Vec<R>,
    /// Total matching records across all pages, not just this one.
    pub total_count: u64,
}

/// Abstract contract with the remote collection.
///
/// All operations fail with `RosterError::Unauthorized` when the session
/// is invalid (callers redirect to login, no retry) or
/// `RosterError::Remote` for anything else (message surfaced to the user,
/// previous view state retained, no retry).
#[async_trait]
pub trait CollectionEndpoint: Send + Sync {
    /// Record type this endpoint serves.
    type Record: Send;
    /// Create/update payload, typically the validated form values.
    type Draft: Send + Sync;

    /// Fetch one page matching the query.
    async fn list(&self, query: &ListQuery) -> Result<ListPage<Self::Record>>;

    /// Create a record from a draft, returning the stored record.
    async fn create(&self, draft: &Self::Draft) -> Result<Self::Record>;

    /// Update the record with the given id, returning the stored record.
    async fn update(&self, id: &str, draft: &Self::Draft) -> Result<Self::Record>;

    /// Delete the record with the given id.
    async fn delete(&self, id: &str) -> Result<()>;
}
