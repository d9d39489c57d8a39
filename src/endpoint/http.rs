//! REST implementation of [`CollectionEndpoint`].
//!
//! Speaks the admin backend's dialect:
//!
//! - `GET {base}/{collection}?page=&limit=` with optional search/filter
//!   params, returning `{ data: { <collection>: [...], pagination:
//!   { totalRecord, limit, page } } }` — or a bare `{ data: [...] }` for
//!   endpoints that skip the pagination envelope.
//! - `POST {base}/{collection}`, `PUT {base}/{collection}/{id}`,
//!   `DELETE {base}/{collection}/{id}` with a JSON draft body.
//!
//! HTTP 401 maps to `RosterError::Unauthorized`; any other failure maps to
//! `RosterError::Remote` carrying the backend's `message` field when one
//! is present, so the UI shows the server's own wording.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{Result, RosterError};

use super::{CollectionEndpoint, ListPage, ListQuery, Session};

/// Binds a record type to its REST collection.
pub trait RestResource: DeserializeOwned + Send {
    /// URL path segment and list-envelope key, e.g. `"brands"`.
    const COLLECTION: &'static str;

    /// Query parameter the backend accepts for server-side search
    /// (`Some("title")` for tech news). `None` means the backend has no
    /// search param and search text is not forwarded.
    const SEARCH_PARAM: Option<&'static str> = None;

    /// Create/update payload for this record.
    type Draft: Serialize + Send + Sync;
}

/// `reqwest`-backed endpoint for one REST collection.
pub struct HttpEndpoint<R> {
    client: Client,
    base_url: Url,
    session: Session,
    _record: PhantomData<fn() -> R>,
}

impl<R: RestResource> HttpEndpoint<R> {
    /// Create an endpoint rooted at `base_url` (e.g.
    /// `http://localhost:8889/api/v1`).
    ///
    /// Configures the HTTP client with a 30s connect timeout and 60s total
    /// timeout.
    pub fn new(base_url: &str, session: Session) -> Result<Self> {
        // A trailing slash makes Url::join treat the last segment as a
        // directory instead of replacing it.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| RosterError::InvalidUrl(format!("{base_url}: {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url,
            session,
            _record: PhantomData,
        })
    }

    fn collection_url(&self) -> Result<Url> {
        self.base_url
            .join(R::COLLECTION)
            .map_err(|e| RosterError::InvalidUrl(e.to_string()))
    }

    fn record_url(&self, id: &str) -> Result<Url> {
        self.base_url
            .join(&format!("{}/{}", R::COLLECTION, id))
            .map_err(|e| RosterError::InvalidUrl(e.to_string()))
    }

    /// Check the response status, turning failures into the error
    /// taxonomy and successes into the parsed JSON body.
    async fn read_body(response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(RosterError::Unauthorized);
        }

        if !status.is_success() {
            // Prefer the backend's own message when the error body
            // carries one; it is the text shown to the user.
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(RosterError::Remote(message));
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl<R> CollectionEndpoint for HttpEndpoint<R>
where
    R: RestResource + Send + Sync,
{
    type Record = R;
    type Draft = R::Draft;

    async fn list(&self, query: &ListQuery) -> Result<ListPage<R>> {
        let mut params: Vec<(String, String)> = vec![
            ("page".to_string(), query.page.to_string()),
            ("limit".to_string(), query.page_size.to_string()),
        ];

        if let Some(param) = R::SEARCH_PARAM
            && let Some(text) = query.search_text.as_deref()
            && !text.trim().is_empty()
        {
            params.push((param.to_string(), text.to_string()));
        }

        for (name, value) in &query.filters {
            params.push((name.clone(), value.as_param()));
        }

        let response = self
            .client
            .get(self.collection_url()?)
            .header(header::AUTHORIZATION, self.session.bearer())
            .query(&params)
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        parse_list_envelope(&body, R::COLLECTION)
    }

    async fn create(&self, draft: &R::Draft) -> Result<R> {
        let response = self
            .client
            .post(self.collection_url()?)
            .header(header::AUTHORIZATION, self.session.bearer())
            .json(draft)
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        parse_record_envelope(&body)
    }

    async fn update(&self, id: &str, draft: &R::Draft) -> Result<R> {
        let response = self
            .client
            .put(self.record_url(id)?)
            .header(header::AUTHORIZATION, self.session.bearer())
            .json(draft)
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        parse_record_envelope(&body)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.record_url(id)?)
            .header(header::AUTHORIZATION, self.session.bearer())
            .send()
            .await?;

        Self::read_body(response).await?;
        Ok(())
    }
}

/// Extract `items` and `totalCount` from a list response body.
///
/// Accepts both envelope shapes the backend produces:
/// `data.{collection}` with a `data.pagination.totalRecord`, and a bare
/// `data` array (total falls back to the item count).
fn parse_list_envelope<R: DeserializeOwned>(body: &Value, collection: &str) -> Result<ListPage<R>> {
    let data = body
        .get("data")
        .ok_or_else(|| RosterError::MalformedResponse("missing `data` field".to_string()))?;

    let items_value = match data.get(collection) {
        Some(items) => items.clone(),
        None if data.is_array() => data.clone(),
        None => {
            return Err(RosterError::MalformedResponse(format!(
                "expected `data.{collection}` or a `data` array"
            )));
        }
    };

    let items: Vec<R> = serde_json::from_value(items_value)?;

    let total_count = data
        .pointer("/pagination/totalRecord")
        .and_then(Value::as_u64)
        .unwrap_or(items.len() as u64);

    Ok(ListPage { items, total_count })
}

/// Extract a single record from a create/update response body.
///
/// The backend returns either `{ data: {record} }` or `{ data: { <name>:
/// {record} } }` depending on the route; try the direct shape first, then
/// a single-keyed wrapper.
fn parse_record_envelope<R: DeserializeOwned>(body: &Value) -> Result<R> {
    let data = body
        .get("data")
        .ok_or_else(|| RosterError::MalformedResponse("missing `data` field".to_string()))?;

    if let Ok(record) = serde_json::from_value::<R>(data.clone()) {
        return Ok(record);
    }

    if let Some(object) = data.as_object()
        && object.len() == 1
        && let Some(inner) = object.values().next()
    {
        return Ok(serde_json::from_value(inner.clone())?);
    }

    Err(RosterError::MalformedResponse(
        "response `data` is not a record".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Widget {
        #[serde(rename = "_id")]
        id: String,
        name: String,
    }

    #[test]
    fn test_parse_list_envelope_with_pagination() {
        let body = json!({
            "data": {
                "widgets": [
                    { "_id": "w1", "name": "first" },
                    { "_id": "w2", "name": "second" }
                ],
                "pagination": { "totalRecord": 41, "limit": 2, "page": 1 }
            }
        });
        let page: ListPage<Widget> = parse_list_envelope(&body, "widgets").unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, 41);
    }

    #[test]
    fn test_parse_list_envelope_bare_array() {
        let body = json!({
            "data": [ { "_id": "w1", "name": "only" } ]
        });
        let page: ListPage<Widget> = parse_list_envelope(&body, "widgets").unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_count, 1);
    }

    #[test]
    fn test_parse_list_envelope_missing_data() {
        let body = json!({ "widgets": [] });
        let err = parse_list_envelope::<Widget>(&body, "widgets").unwrap_err();
        assert!(matches!(err, RosterError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_record_envelope_direct() {
        let body = json!({ "data": { "_id": "w9", "name": "direct" } });
        let widget: Widget = parse_record_envelope(&body).unwrap();
        assert_eq!(widget.id, "w9");
    }

    #[test]
    fn test_parse_record_envelope_wrapped() {
        let body = json!({ "data": { "widget": { "_id": "w9", "name": "wrapped" } } });
        let widget: Widget = parse_record_envelope(&body).unwrap();
        assert_eq!(widget.name, "wrapped");
    }
}
