/* src/client/core/src/loader/mod.rs */

// Accumulating loader for "load more" style galleries.


use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_core::Stream;
use futures_util::future::{AbortHandle, Abortable};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, warn};

use crate::errors::StudioError;
use crate::notify::Notifier;
use crate::page::{Cursor, PageRequest, check_page_size};
use crate::source::PageSource;
use crate::state::{Exhaustion, LoaderSnapshot};

/// What a `load`/`set_filters` call ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
  Loaded { appended: usize, complete: bool },
  /// A fetch was already in flight; nothing was queued.
  Busy,
  /// The collection is exhausted (or failed) for the active filters.
  Exhausted,
  /// Same filters with data already present.
  Unchanged,
  Failed(StudioError),
  /// The fetch was cancelled by new filters or `close()`.
  Superseded,
  Closed,
}

struct InFlight {
  ticket: u64,
  abort: AbortHandle,
}

struct LoaderState<T, F> {
  items: Arc<Vec<T>>,
  filters: F,
  next_cursor: Option<Cursor>,
  exhaustion: Exhaustion,
  total: Option<u64>,
  in_flight: Option<InFlight>,
  ticket: u64,
  closed: bool,
}

impl<T, F> LoaderState<T, F> {
  fn clear(&mut self) {
    self.items = Arc::new(Vec::new());
    self.next_cursor = None;
    self.exhaustion = Exhaustion::Open;
    self.total = None;
  }

  fn cancel_in_flight(&mut self) -> bool {
    match self.in_flight.take() {
      Some(in_flight) => {
        in_flight.abort.abort();
        true
      }
      None => false,
    }
  }
}

struct Shared<S: PageSource> {
  source: S,
  page_size: u32,
  label: String,
  notifier: Option<Arc<dyn Notifier>>,
  state: Mutex<LoaderState<S::Item, S::Filters>>,
  snapshot: watch::Sender<LoaderSnapshot<S::Item>>,
}

impl<S: PageSource> Drop for Shared<S> {
  fn drop(&mut self) {
    let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
    state.cancel_in_flight();
  }
}

/// Loads a filtered, cursor-paginated collection page by page and accumulates
/// the results. Clones share the same state.
pub struct PagedLoader<S: PageSource> {
  shared: Arc<Shared<S>>,
}

/// Clears the in-flight marker if a `load` future is dropped before its fetch
/// resolves.
struct FetchGuard<'a, S: PageSource> {
  loader: &'a PagedLoader<S>,
  ticket: u64,
}

impl<S: PageSource> Drop for FetchGuard<'_, S> {
  fn drop(&mut self) {
    let mut state = self.loader.lock();
    if state.in_flight.as_ref().map(|f| f.ticket) == Some(self.ticket) {
      state.cancel_in_flight();
      debug!(loader = %self.loader.shared.label, "load dropped mid-fetch");
      self.loader.publish(&state);
    }
  }
}

impl<S: PageSource> Clone for PagedLoader<S> {
  fn clone(&self) -> Self {
    Self { shared: self.shared.clone() }
  }
}

pub struct PagedLoaderBuilder<S: PageSource> {
  source: S,
  filters: S::Filters,
  page_size: u32,
  label: String,
  notifier: Option<Arc<dyn Notifier>>,
}

impl<S: PageSource> PagedLoaderBuilder<S> {
  pub fn page_size(mut self, page_size: u32) -> Self {
    self.page_size = page_size;
    self
  }

  /// Name used in log lines, e.g. "gallery".
  pub fn label(mut self, label: impl Into<String>) -> Self {
    self.label = label.into();
    self
  }

  pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
    self.notifier = Some(notifier);
    self
  }

  pub fn build(self) -> Result<PagedLoader<S>, StudioError> {
    let page_size = check_page_size(self.page_size)?;
    let state = LoaderState {
      items: Arc::new(Vec::new()),
      filters: self.filters,
      next_cursor: None,
      exhaustion: Exhaustion::Open,
      total: None,
      in_flight: None,
      ticket: 0,
      closed: false,
    };
    let (snapshot, _) = watch::channel(LoaderSnapshot::default());
    Ok(PagedLoader {
      shared: Arc::new(Shared {
        source: self.source,
        page_size,
        label: self.label,
        notifier: self.notifier,
        state: Mutex::new(state),
        snapshot,
      }),
    })
  }
}

impl<S: PageSource> PagedLoader<S> {
  pub const DEFAULT_PAGE_SIZE: u32 = 12;

  pub fn builder(source: S, filters: S::Filters) -> PagedLoaderBuilder<S> {
    PagedLoaderBuilder {
      source,
      filters,
      page_size: Self::DEFAULT_PAGE_SIZE,
      label: "collection".to_string(),
      notifier: None,
    }
  }

  pub fn new(source: S, filters: S::Filters, page_size: u32) -> Result<Self, StudioError> {
    Self::builder(source, filters).page_size(page_size).build()
  }

  fn lock(&self) -> MutexGuard<'_, LoaderState<S::Item, S::Filters>> {
    self.shared.state.lock().unwrap_or_else(PoisonError::into_inner)
  }

  fn publish(&self, state: &LoaderState<S::Item, S::Filters>) {
    self.shared.snapshot.send_replace(LoaderSnapshot {
      items: state.items.clone(),
      is_loading: state.in_flight.is_some(),
      exhaustion: state.exhaustion.clone(),
      total: state.total,
    });
  }

  pub fn page_size(&self) -> u32 {
    self.shared.page_size
  }

  pub fn filters(&self) -> S::Filters {
    self.lock().filters.clone()
  }

  pub fn snapshot(&self) -> LoaderSnapshot<S::Item> {
    self.shared.snapshot.borrow().clone()
  }

  /// Receiver that starts with the current snapshot and sees every change.
  pub fn subscribe(&self) -> watch::Receiver<LoaderSnapshot<S::Item>> {
    self.shared.snapshot.subscribe()
  }

  pub fn changes(&self) -> impl Stream<Item = LoaderSnapshot<S::Item>> + Send + use<S> {
    WatchStream::new(self.subscribe())
  }

  /// Replace the filter record. Identical filters with data already loaded
  /// (or exhausted) are ignored; anything else clears the list and refetches,
  /// cancelling a fetch still running for the old filters.
  pub async fn set_filters(&self, filters: S::Filters) -> LoadOutcome {
    {
      let mut state = self.lock();
      if state.closed {
        return LoadOutcome::Closed;
      }
      if state.filters == filters {
        if state.in_flight.is_some() {
          return LoadOutcome::Busy;
        }
        if !state.items.is_empty() || !state.exhaustion.is_open() {
          debug!(loader = %self.shared.label, "filters unchanged, keeping loaded items");
          return LoadOutcome::Unchanged;
        }
      }
      state.filters = filters;
      if state.cancel_in_flight() {
        debug!(loader = %self.shared.label, "filters changed, cancelled in-flight fetch");
      }
    }
    self.load(true).await
  }

  /// Append the next page.
  pub async fn load_more(&self) -> LoadOutcome {
    self.load(false).await
  }

  /// Drop everything loaded so far and fetch the first page again.
  pub async fn reset(&self) -> LoadOutcome {
    self.load(true).await
  }

  pub async fn load(&self, reset: bool) -> LoadOutcome {
    let (request, ticket, registration) = {
      let mut state = self.lock();
      if state.closed {
        return LoadOutcome::Closed;
      }
      if state.in_flight.is_some() {
        debug!(loader = %self.shared.label, "fetch already in flight, skipping");
        return LoadOutcome::Busy;
      }
      if reset {
        state.clear();
        self.shared.source.reset_requests();
      } else if !state.exhaustion.is_open() {
        return LoadOutcome::Exhausted;
      }

      let (abort, registration) = AbortHandle::new_pair();
      state.ticket += 1;
      let ticket = state.ticket;
      state.in_flight = Some(InFlight { ticket, abort });
      let request =
        PageRequest::new(self.shared.page_size, state.next_cursor.clone(), state.filters.clone());
      self.publish(&state);
      (request, ticket, registration)
    };

    let guard = FetchGuard { loader: self, ticket };
    let result = Abortable::new(self.shared.source.fetch_page(request), registration).await;

    let mut state = self.lock();
    if state.in_flight.as_ref().map(|f| f.ticket) != Some(ticket) {
      return if state.closed { LoadOutcome::Closed } else { LoadOutcome::Superseded };
    }
    state.in_flight = None;

    let mut failure = None;
    let outcome = match result {
      Err(_aborted) => LoadOutcome::Superseded,
      Ok(Ok(page)) => {
        let appended = page.data.len();
        Arc::make_mut(&mut state.items).extend(page.data);
        state.next_cursor = page.next_page_cursor;
        state.total = Some(page.count);
        let complete = state.next_cursor.is_none();
        if complete {
          state.exhaustion = Exhaustion::Complete;
        }
        debug!(loader = %self.shared.label, appended, complete, "page loaded");
        LoadOutcome::Loaded { appended, complete }
      }
      Ok(Err(err)) => {
        warn!(loader = %self.shared.label, error = %err, "fetch failed, paging stopped");
        state.exhaustion = Exhaustion::Failed(err.clone());
        failure = Some(err.message().to_string());
        LoadOutcome::Failed(err)
      }
    };
    self.publish(&state);
    drop(state);
    drop(guard);

    // Notify unlocked: notifiers may call back into the loader.
    if let (Some(notifier), Some(message)) = (&self.shared.notifier, failure) {
      notifier.notify_error(&message);
    }
    outcome
  }

  /// Put a freshly created item at the front of the list without refetching.
  pub fn add_item(&self, item: S::Item) {
    let mut state = self.lock();
    Arc::make_mut(&mut state.items).insert(0, item);
    if let Some(total) = state.total.as_mut() {
      *total += 1;
    }
    self.publish(&state);
  }

  /// Cancel any in-flight fetch and refuse further loads.
  pub fn close(&self) {
    let mut state = self.lock();
    state.closed = true;
    if state.cancel_in_flight() {
      debug!(loader = %self.shared.label, "closed with a fetch in flight");
    }
    self.publish(&state);
  }

  pub fn is_closed(&self) -> bool {
    self.lock().closed
  }
}
