//! In-memory collection endpoint for controller tests.
//!
//! Behaves like the real backend: applies filters and search server-side,
//! slices the requested page, and reports the filtered total. Tests can
//! script per-call latency and failures, and inspect every query issued.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use roster::{
    CollectionEndpoint, Filterable, FilterValue, ListPage, ListQuery, Result, RosterError,
};

/// Minimal record with a text field, an enum-ish field, and a boolean,
/// enough to exercise every filter shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Gadget {
    pub id: String,
    pub code: String,
    pub kind: String,
    pub active: bool,
}

impl Gadget {
    pub fn new(id: &str, code: &str, kind: &str, active: bool) -> Self {
        Self {
            id: id.to_string(),
            code: code.to_string(),
            kind: kind.to_string(),
            active,
        }
    }
}

impl Filterable for Gadget {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> String {
        self.code.clone()
    }

    fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "kind" => Some(FilterValue::Text(self.kind.clone())),
            "active" => Some(FilterValue::Flag(self.active)),
            _ => None,
        }
    }
}

/// Create/update payload for a Gadget.
#[derive(Debug, Clone)]
pub struct GadgetDraft {
    pub code: String,
    pub kind: String,
    pub active: bool,
}

/// Scripted failure for the next matching call.
pub enum ScriptedFailure {
    Remote,
    Unauthorized,
}

struct MockState {
    records: Mutex<Vec<Gadget>>,
    queries: Mutex<Vec<ListQuery>>,
    list_calls: AtomicUsize,
    /// Per-call latency; calls beyond the script resolve immediately.
    delays: Mutex<VecDeque<Duration>>,
    fail_next: Mutex<Option<ScriptedFailure>>,
    next_id: AtomicUsize,
}

#[derive(Clone)]
pub struct MockEndpoint {
    state: Arc<MockState>,
}

impl MockEndpoint {
    pub fn new(records: Vec<Gadget>) -> Self {
        Self {
            state: Arc::new(MockState {
                records: Mutex::new(records),
                queries: Mutex::new(Vec::new()),
                list_calls: AtomicUsize::new(0),
                delays: Mutex::new(VecDeque::new()),
                fail_next: Mutex::new(None),
                next_id: AtomicUsize::new(1000),
            }),
        }
    }

    pub fn list_calls(&self) -> usize {
        self.state.list_calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<ListQuery> {
        self.state.queries.lock().clone()
    }

    pub fn push_delay(&self, delay: Duration) {
        self.state.delays.lock().push_back(delay);
    }

    pub fn fail_next(&self, failure: ScriptedFailure) {
        *self.state.fail_next.lock() = Some(failure);
    }

    fn take_failure(&self) -> Option<RosterError> {
        match self.state.fail_next.lock().take() {
            Some(ScriptedFailure::Remote) => {
                Some(RosterError::Remote("backend unavailable".to_string()))
            }
            Some(ScriptedFailure::Unauthorized) => Some(RosterError::Unauthorized),
            None => None,
        }
    }

    fn matches(gadget: &Gadget, query: &ListQuery) -> bool {
        for (name, wanted) in &query.filters {
            match gadget.field(name) {
                Some(actual) if actual == *wanted => {}
                _ => return false,
            }
        }
        match query.search_text.as_deref() {
            Some(needle) if !needle.is_empty() => gadget
                .search_text()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => true,
        }
    }
}

#[async_trait]
impl CollectionEndpoint for MockEndpoint {
    type Record = Gadget;
    type Draft = GadgetDraft;

    async fn list(&self, query: &ListQuery) -> Result<ListPage<Gadget>> {
        self.state.list_calls.fetch_add(1, Ordering::SeqCst);
        self.state.queries.lock().push(query.clone());

        let delay = self.state.delays.lock().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        let filtered: Vec<Gadget> = self
            .state
            .records
            .lock()
            .iter()
            .filter(|g| Self::matches(g, query))
            .cloned()
            .collect();

        let total_count = filtered.len() as u64;
        let start = (query.page.max(1) as usize - 1) * query.page_size as usize;
        let items = filtered
            .into_iter()
            .skip(start)
            .take(query.page_size as usize)
            .collect();

        Ok(ListPage { items, total_count })
    }

    async fn create(&self, draft: &GadgetDraft) -> Result<Gadget> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let id = format!("g{}", self.state.next_id.fetch_add(1, Ordering::SeqCst));
        let gadget = Gadget::new(&id, &draft.code, &draft.kind, draft.active);
        self.state.records.lock().push(gadget.clone());
        Ok(gadget)
    }

    async fn update(&self, id: &str, draft: &GadgetDraft) -> Result<Gadget> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let mut records = self.state.records.lock();
        let gadget = records
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| RosterError::Remote(format!("no record '{id}'")))?;
        gadget.code = draft.code.clone();
        gadget.kind = draft.kind.clone();
        gadget.active = draft.active;
        Ok(gadget.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let mut records = self.state.records.lock();
        let before = records.len();
        records.retain(|g| g.id != id);
        if records.len() == before {
            return Err(RosterError::Remote(format!("no record '{id}'")));
        }
        Ok(())
    }
}

/// Standard four-record population used across tests.
pub fn population() -> Vec<Gadget> {
    vec![
        Gadget::new("1", "X1", "percentage", true),
        Gadget::new("2", "X2", "fixed", false),
        Gadget::new("3", "Y1", "percentage", false),
        Gadget::new("4", "Y2", "fixed", true),
    ]
}
