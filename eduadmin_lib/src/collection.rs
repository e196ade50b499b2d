//! Race-safe paginated collection controller.
//!
//! Every management screen drives one `PagedCollection`: the screen owns
//! filter and page state, the collection issues fetches through a
//! [`PageSource`] adapter and guarantees that the visible result always
//! reflects the most recently requested state, even when responses of
//! overlapping requests arrive out of order.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::AdminError;
use crate::window::{page_window, PageLink};

/// A single filter value: free text or a numeric id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Number(i64),
}

impl FilterValue {
    /// An empty text value is the "unset" sentinel; it never reaches a
    /// request.
    pub fn is_empty(&self) -> bool {
        matches!(self, FilterValue::Text(t) if t.is_empty())
    }

    /// The value as it appears in an outgoing query string.
    pub fn as_param(&self) -> String {
        match self {
            FilterValue::Text(t) => t.clone(),
            FilterValue::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value)
    }
}

/// The active filters of one screen, keyed by filter name.
///
/// Setting a key to an empty value removes it, so unset filters never
/// appear in outgoing requests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSet {
    entries: BTreeMap<String, FilterValue>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<FilterValue>) {
        let value = value.into();
        if value.is_empty() {
            self.entries.remove(key);
        } else {
            self.entries.insert(key.to_string(), value);
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.entries.get(key)
    }

    /// The filter as text, when set.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            FilterValue::Text(t) => Some(t.as_str()),
            FilterValue::Number(_) => None,
        }
    }

    /// The filter as a number; numeric text is accepted too.
    pub fn number(&self, key: &str) -> Option<i64> {
        match self.entries.get(key)? {
            FilterValue::Number(n) => Some(*n),
            FilterValue::Text(t) => t.parse().ok(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Immutable snapshot of the view a fetch was issued for. Compared by
/// value to detect staleness and idempotence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
    pub filters: FilterSet,
}

/// One normalized page of a collection, whatever envelope shape the
/// backend used.
#[derive(Clone, Debug)]
pub struct PageResult<T> {
    /// Items in server order; never re-sorted here.
    pub items: Vec<T>,
    /// Total matching items; `None` when the backend reports only page
    /// counts.
    pub total_items: Option<i64>,
    pub total_pages: i64,
}

/// Adapter from one backend endpoint to the normalized page contract.
///
/// Implementations unwrap their endpoint's envelope shape (and perform
/// client-side slicing where the backend does not paginate) so the
/// controller never sees shape differences.
pub trait PageSource {
    type Item;

    /// Fetches one page of the collection for the given snapshot.
    fn fetch_page(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = Result<PageResult<Self::Item>, AdminError>> + Send;
}

/// Outcome of a reload or navigation.
#[derive(Debug)]
pub enum Refresh<T> {
    /// A fresh result was applied.
    Updated(Arc<PageResult<T>>),
    /// A newer request was issued while this one was in flight; the
    /// response was discarded.
    Stale,
    /// The navigation was refused (already there, out of range, or
    /// nothing loaded yet); no fetch was issued.
    Noop,
}

struct ControllerState<T> {
    current_page: i64,
    filters: FilterSet,
    last_result: Option<Arc<PageResult<T>>>,
}

/// Filter, pagination, and result bookkeeping for one remote collection.
///
/// All methods take `&self`; state lives behind a mutex that is never
/// held across an await. Overlapping requests are neither queued nor
/// cancelled: each fetch carries a ticket from a monotonic counter, and
/// a response is applied only while its ticket is still the latest. A
/// failed fetch leaves every piece of state exactly as the operation set
/// it, so the next reload retries the same view.
pub struct PagedCollection<S: PageSource> {
    source: S,
    page_size: i64,
    issued: AtomicU64,
    state: Mutex<ControllerState<S::Item>>,
}

impl<S: PageSource> PagedCollection<S> {
    /// Creates a controller on page 1 with no filters and nothing loaded.
    pub fn new(source: S, page_size: i64) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            issued: AtomicU64::new(0),
            state: Mutex::new(ControllerState {
                current_page: 1,
                filters: FilterSet::new(),
                last_result: None,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ControllerState<S::Item>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn current_page(&self) -> i64 {
        self.state().current_page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn filters(&self) -> FilterSet {
        self.state().filters.clone()
    }

    /// The most recently applied result, if any request succeeded yet.
    pub fn last_result(&self) -> Option<Arc<PageResult<S::Item>>> {
        self.state().last_result.clone()
    }

    /// Seeds filters and page before the first load, e.g. from CLI flags.
    /// No fetch is issued; the next [`reload`](Self::reload) fetches
    /// exactly this view.
    pub fn prepare(&self, filters: FilterSet, page: i64) {
        let mut state = self.state();
        state.filters = filters;
        state.current_page = page.max(1);
    }

    /// Sets one filter (an empty value removes it), returns to page 1,
    /// and reloads.
    pub async fn set_filter(
        &self,
        key: &str,
        value: impl Into<FilterValue>,
    ) -> Result<Refresh<S::Item>, AdminError> {
        {
            let mut state = self.state();
            state.filters.set(key, value);
            state.current_page = 1;
        }
        self.reload().await
    }

    /// Clears every filter, returns to page 1, and reloads.
    pub async fn reset_filters(&self) -> Result<Refresh<S::Item>, AdminError> {
        {
            let mut state = self.state();
            state.filters.clear();
            state.current_page = 1;
        }
        self.reload().await
    }

    /// Navigates to `page` and reloads. Refused without a fetch when the
    /// page is current, out of `[1, total_pages]`, or no result has been
    /// loaded yet.
    pub async fn go_to_page(&self, page: i64) -> Result<Refresh<S::Item>, AdminError> {
        {
            let mut state = self.state();
            let total_pages = match &state.last_result {
                Some(result) => result.total_pages,
                None => return Ok(Refresh::Noop),
            };
            if page == state.current_page || page < 1 || page > total_pages {
                return Ok(Refresh::Noop);
            }
            state.current_page = page;
        }
        self.reload().await
    }

    /// Fetches the current view. The result is applied only while no
    /// newer request has been issued; stale results and stale errors are
    /// discarded as [`Refresh::Stale`].
    pub async fn reload(&self) -> Result<Refresh<S::Item>, AdminError> {
        let (request, ticket) = {
            let state = self.state();
            let request = PageRequest {
                page: state.current_page,
                page_size: self.page_size,
                filters: state.filters.clone(),
            };
            // Issued under the lock so ticket order matches snapshot order.
            let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            (request, ticket)
        };

        tracing::debug!("fetching page {} (request {})", request.page, ticket);
        match self.source.fetch_page(request).await {
            Ok(result) => {
                let mut state = self.state();
                // Checked under the lock; a newer response cannot be
                // overwritten by this one.
                if ticket != self.issued.load(Ordering::SeqCst) {
                    tracing::debug!("discarding stale result of request {}", ticket);
                    return Ok(Refresh::Stale);
                }
                let result = Arc::new(result);
                state.last_result = Some(Arc::clone(&result));
                Ok(Refresh::Updated(result))
            }
            Err(err) => {
                if ticket != self.issued.load(Ordering::SeqCst) {
                    tracing::debug!("discarding stale error of request {}: {}", ticket, err);
                    return Ok(Refresh::Stale);
                }
                Err(err)
            }
        }
    }

    /// The pager strip for the current view; empty before the first load.
    pub fn pagination_view(&self) -> Vec<PageLink> {
        let state = self.state();
        match &state.last_result {
            Some(result) => page_window(state.current_page, result.total_pages),
            None => Vec::new(),
        }
    }
}
