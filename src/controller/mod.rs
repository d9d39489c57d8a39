//! The list controller: a searchable, paginated, filterable collection
//! view backed by a remote endpoint.
//!
//! One controller owns one view's `QueryState` and cache. User-driven
//! query changes come in through the setters (or `on_query_change`), the
//! controller decides whether to hit the remote endpoint or recompute from
//! cache, and every outcome is published atomically through a `watch`
//! channel — observers never see a filtered count paired with a page from
//! a different filter pass.
//!
//! # Ordering
//!
//! Result application follows *issue* order, not arrival order. Every
//! fetch takes a sequence number at issue time; a response (or error)
//! whose number is no longer the latest issued is dropped without being
//! applied or surfaced. Debounced search is the only other async
//! primitive: a new keystroke inside the window discards the previously
//! scheduled recompute outright.

mod debounce;
mod filtering;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::config::ListConfig;
use crate::endpoint::{CollectionEndpoint, ListPage, ListQuery};
use crate::error::{Result, RosterError};
use crate::query::{FetchMode, QueryPatch, QueryState, ResultSet, clamp_page};
use crate::types::{Filterable, FilterValue};

use debounce::Debouncer;

/// Controller for one collection view. Cheap to clone; clones share the
/// same state, cache, and subscriptions.
pub struct ListController<E: CollectionEndpoint>
where
    E::Record: Filterable + Clone + Send + Sync + 'static,
{
    inner: Arc<Inner<E>>,
}

impl<E: CollectionEndpoint> Clone for ListController<E>
where
    E::Record: Filterable + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<E: CollectionEndpoint>
where
    E::Record: Filterable + Clone + Send + Sync + 'static,
{
    endpoint: E,
    config: ListConfig,
    state: Mutex<State<E::Record>>,
    /// Sequence number of the most recently issued fetch. A completed
    /// fetch may only apply its result while it still holds this number.
    issue_seq: AtomicU64,
    in_flight: AtomicUsize,
    results_tx: watch::Sender<ResultSet<E::Record>>,
    /// Failure notices from the debounced path, which has no caller to
    /// return an error to.
    failures_tx: watch::Sender<Option<String>>,
    debounce: Debouncer,
}

struct State<R> {
    query: QueryState,
    /// Bulk-fetched population for `ClientCached` mode. `None` means
    /// empty or invalidated; the next recompute refetches.
    cache: Option<Vec<R>>,
}

/// What became of one issued fetch.
enum FetchOutcome<R> {
    /// Response arrived and this fetch is still the latest issued.
    Fresh(ListPage<R>),
    /// A newer fetch was issued meanwhile; result (or error) discarded.
    Stale,
    Failed(RosterError),
}

impl<E> ListController<E>
where
    E: CollectionEndpoint + 'static,
    E::Record: Filterable + Clone + Send + Sync + 'static,
{
    pub fn new(endpoint: E, config: ListConfig) -> Self {
        let (results_tx, _) = watch::channel(ResultSet::default());
        let (failures_tx, _) = watch::channel(None);
        let debounce = Debouncer::new(config.debounce_delay());
        let query = QueryState::new(config.default_page_size);

        Self {
            inner: Arc::new(Inner {
                endpoint,
                config,
                state: Mutex::new(State { query, cache: None }),
                issue_seq: AtomicU64::new(0),
                in_flight: AtomicUsize::new(0),
                results_tx,
                failures_tx,
                debounce,
            }),
        }
    }

    /// Load the initial page. Call once after mount; all later recomputes
    /// go through the query setters and `invalidate`.
    pub async fn refresh(&self) -> Result<()> {
        recompute(&self.inner).await
    }

    /// Update search text and schedule a debounced recompute. Returns
    /// immediately; only the most recent call inside the debounce window
    /// actually recomputes. Failures from the deferred recompute are
    /// published via [`subscribe_failures`](Self::subscribe_failures).
    pub fn set_search_text(&self, text: impl Into<String>) {
        {
            let mut state = self.inner.state.lock();
            state.query.apply(QueryPatch::search(text.into()));
        }
        self.schedule_debounced();
    }

    /// Activate a filter and recompute immediately. Resets to page 1.
    pub async fn set_filter(
        &self,
        name: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> Result<()> {
        {
            let mut state = self.inner.state.lock();
            state.query.apply(QueryPatch::filter(name.into(), value.into()));
        }
        recompute(&self.inner).await
    }

    /// Deactivate a filter entirely ("all" in a filter dropdown) and
    /// recompute. Distinct from setting the filter to a falsy value.
    pub async fn clear_filter(&self, name: &str) -> Result<()> {
        {
            let mut state = self.inner.state.lock();
            state.query.apply(QueryPatch {
                clear_filters: vec![name.to_string()],
                ..Default::default()
            });
        }
        recompute(&self.inner).await
    }

    /// Jump to a page. In `ClientCached` mode this never issues a remote
    /// call; the slice is recomputed from the cached population.
    pub async fn set_page(&self, page: u32) -> Result<()> {
        self.on_query_change(QueryPatch::page(page)).await
    }

    pub async fn set_page_size(&self, size: u32) -> Result<()> {
        self.on_query_change(QueryPatch {
            page_size: Some(size),
            ..Default::default()
        })
        .await
    }

    /// Entry point for arbitrary partial query updates coming from the
    /// presentation layer (e.g. a table's combined page/page-size change
    /// event). Search-only patches go through the debounce window; any
    /// other patch recomputes immediately.
    pub async fn on_query_change(&self, patch: QueryPatch) -> Result<()> {
        let debounced = patch.is_search_only();
        {
            let mut state = self.inner.state.lock();
            state.query.apply(patch);
        }
        if debounced {
            self.schedule_debounced();
            Ok(())
        } else {
            recompute(&self.inner).await
        }
    }

    /// Discard derived state after a mutation. `ClientCached`: clears the
    /// cache and refetches the population. `ServerPaged`: refetches the
    /// current page. On failure the previous ResultSet stays in place so
    /// the caller can tell the user the view may be out of date.
    pub async fn invalidate(&self) -> Result<()> {
        if self.inner.config.fetch_mode == FetchMode::ClientCached {
            self.inner.state.lock().cache = None;
        }
        recompute(&self.inner).await
    }

    /// Create a record, then invalidate. A failed invalidate after a
    /// successful create surfaces the error while the list still shows
    /// pre-mutation data.
    pub async fn submit_create(&self, draft: &E::Draft) -> Result<E::Record> {
        let record = self.inner.endpoint.create(draft).await?;
        self.invalidate().await?;
        Ok(record)
    }

    /// Update a record, then invalidate.
    pub async fn submit_update(&self, id: &str, draft: &E::Draft) -> Result<E::Record> {
        let record = self.inner.endpoint.update(id, draft).await?;
        self.invalidate().await?;
        Ok(record)
    }

    /// Delete a record, then invalidate.
    pub async fn submit_delete(&self, id: &str) -> Result<()> {
        self.inner.endpoint.delete(id).await?;
        self.invalidate().await
    }

    /// The last-published ResultSet. Synchronous and side-effect free:
    /// reading never triggers a fetch.
    pub fn current_result_set(&self) -> ResultSet<E::Record> {
        self.inner.results_tx.borrow().clone()
    }

    /// Subscribe to ResultSet publications for re-render.
    pub fn subscribe(&self) -> watch::Receiver<ResultSet<E::Record>> {
        self.inner.results_tx.subscribe()
    }

    /// Subscribe to failure notices from the debounced search path.
    pub fn subscribe_failures(&self) -> watch::Receiver<Option<String>> {
        self.inner.failures_tx.subscribe()
    }

    /// True while a fetch is in flight, for spinner/disabled display.
    pub fn is_loading(&self) -> bool {
        self.inner.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Snapshot of the current query state.
    pub fn query(&self) -> QueryState {
        self.inner.state.lock().query.clone()
    }

    fn schedule_debounced(&self) {
        let inner = Arc::clone(&self.inner);
        self.inner.debounce.schedule(Box::pin(async move {
            if let Err(e) = recompute(&inner).await {
                tracing::warn!("debounced recompute failed: {e}");
                inner.failures_tx.send_replace(Some(e.to_string()));
            }
        }));
    }
}

async fn recompute<E>(inner: &Arc<Inner<E>>) -> Result<()>
where
    E: CollectionEndpoint,
    E::Record: Filterable + Clone + Send + Sync + 'static,
{
    match inner.config.fetch_mode {
        FetchMode::ClientCached => recompute_cached(inner).await,
        FetchMode::ServerPaged => recompute_server(inner).await,
    }
}

/// `ClientCached`: refill the cache if needed, then run the local
/// filter/clamp/slice pass and publish in one step.
async fn recompute_cached<E>(inner: &Arc<Inner<E>>) -> Result<()>
where
    E: CollectionEndpoint,
    E::Record: Filterable + Clone + Send + Sync + 'static,
{
    let needs_fetch = inner.state.lock().cache.is_none();

    if needs_fetch {
        let seq = next_seq(inner);
        let bulk = ListQuery::page(1, inner.config.cache_ceiling);
        match issue_fetch(inner, seq, &bulk).await {
            FetchOutcome::Fresh(page) => {
                inner.state.lock().cache = Some(page.items);
            }
            // A newer recompute owns the view now; it will publish.
            FetchOutcome::Stale => return Ok(()),
            // Previous cache and ResultSet stay untouched.
            FetchOutcome::Failed(e) => return Err(e),
        }
    }

    let mut state = inner.state.lock();
    if let Some(cache) = &state.cache {
        let (result_set, page) = filtering::recompute_page(cache, &state.query);
        state.query.page = page;
        inner.results_tx.send_replace(result_set);
    }
    Ok(())
}

/// `ServerPaged`: one request carrying the whole query; the response is
/// authoritative for items and total count. An out-of-range page (empty
/// items, nonzero total) is corrected with a single clamped re-fetch.
async fn recompute_server<E>(inner: &Arc<Inner<E>>) -> Result<()>
where
    E: CollectionEndpoint,
    E::Record: Filterable + Clone + Send + Sync + 'static,
{
    let (seq, list_query) = {
        let state = inner.state.lock();
        (next_seq(inner), to_list_query(&state.query))
    };

    let page = match issue_fetch(inner, seq, &list_query).await {
        FetchOutcome::Fresh(page) => page,
        FetchOutcome::Stale => return Ok(()),
        FetchOutcome::Failed(e) => return Err(e),
    };

    if page.items.is_empty() && page.total_count > 0 && list_query.page > 1 {
        let clamped = clamp_page(list_query.page, list_query.page_size, page.total_count);
        tracing::debug!(
            requested = list_query.page,
            clamped,
            "page out of range, re-fetching last valid page"
        );
        let retry_query = {
            let mut state = inner.state.lock();
            state.query.page = clamped;
            to_list_query(&state.query)
        };
        let seq = next_seq(inner);
        match issue_fetch(inner, seq, &retry_query).await {
            FetchOutcome::Fresh(page) => publish_server_page(inner, page),
            FetchOutcome::Stale => return Ok(()),
            FetchOutcome::Failed(e) => return Err(e),
        }
    } else {
        publish_server_page(inner, page);
    }

    Ok(())
}

fn publish_server_page<E>(inner: &Inner<E>, page: ListPage<E::Record>)
where
    E: CollectionEndpoint,
    E::Record: Filterable + Clone + Send + Sync + 'static,
{
    inner.results_tx.send_replace(ResultSet {
        items: page.items,
        total_count: page.total_count,
    });
}

fn next_seq<E>(inner: &Inner<E>) -> u64
where
    E: CollectionEndpoint,
    E::Record: Filterable + Clone + Send + Sync + 'static,
{
    inner.issue_seq.fetch_add(1, Ordering::SeqCst) + 1
}

/// Issue one fetch under the sequence discipline. The outcome is `Stale`
/// whenever a newer fetch was issued before this one resolved — stale
/// errors are swallowed along with stale results, since the user already
/// superseded the request they belong to.
async fn issue_fetch<E>(
    inner: &Inner<E>,
    seq: u64,
    query: &ListQuery,
) -> FetchOutcome<E::Record>
where
    E: CollectionEndpoint,
    E::Record: Filterable + Clone + Send + Sync + 'static,
{
    tracing::debug!(seq, page = query.page, "issuing list fetch");
    inner.in_flight.fetch_add(1, Ordering::SeqCst);
    let result = inner.endpoint.list(query).await;
    inner.in_flight.fetch_sub(1, Ordering::SeqCst);

    let latest = inner.issue_seq.load(Ordering::SeqCst);
    if seq != latest {
        tracing::debug!(seq, latest, "discarding stale fetch outcome");
        return FetchOutcome::Stale;
    }

    match result {
        Ok(page) => FetchOutcome::Fresh(page),
        Err(e) => FetchOutcome::Failed(e),
    }
}

fn to_list_query(query: &QueryState) -> ListQuery {
    let text = query.search_text.trim();
    ListQuery {
        page: query.page,
        page_size: query.page_size,
        search_text: (!text.is_empty()).then(|| text.to_string()),
        filters: query.filters.clone(),
    }
}
