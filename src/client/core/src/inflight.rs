/* src/client/core/src/inflight.rs */

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::FutureExt;
use futures_util::future::Shared;
use tracing::debug;

use crate::page::{Cursor, PageRequest};
use crate::source::{BoxFuture, FetchResult, PageSource};

type SharedFetch<T> = Shared<BoxFuture<FetchResult<T>>>;

struct Key<F> {
  filters: F,
  cursor: Option<Cursor>,
  limit: u32,
}

impl<F: PartialEq> Key<F> {
  fn matches(&self, request: &PageRequest<F>) -> bool {
    self.limit == request.limit
      && self.cursor == request.start_after
      && self.filters == request.filters
  }

  fn same(&self, other: &Key<F>) -> bool {
    self.limit == other.limit && self.cursor == other.cursor && self.filters == other.filters
  }
}

struct Entry<F, T> {
  key: Key<F>,
  fetch: SharedFetch<T>,
}

type Entries<F, T> = Arc<Mutex<Vec<Entry<F, T>>>>;

/// Collapses identical page requests onto one underlying call.
///
/// A request is identified by its filters, cursor and limit. The shared fetch
/// is forgotten once it resolves with a next cursor or an error, or when
/// `reset_requests` runs; a terminal page stays memoized.
pub struct Deduplicated<S: PageSource> {
  inner: Arc<S>,
  entries: Entries<S::Filters, S::Item>,
}

impl<S: PageSource> Deduplicated<S> {
  pub fn new(inner: S) -> Self {
    Self { inner: Arc::new(inner), entries: Arc::new(Mutex::new(Vec::new())) }
  }

  pub fn inner(&self) -> &S {
    &self.inner
  }

  /// Number of memoized requests.
  pub fn pending(&self) -> usize {
    lock(&self.entries).len()
  }
}

impl<S: PageSource> Clone for Deduplicated<S> {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone(), entries: self.entries.clone() }
  }
}

fn lock<F, T>(entries: &Entries<F, T>) -> MutexGuard<'_, Vec<Entry<F, T>>> {
  entries.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: PageSource> PageSource for Deduplicated<S> {
  type Item = S::Item;
  type Filters = S::Filters;

  fn fetch_page(&self, request: PageRequest<S::Filters>) -> BoxFuture<FetchResult<S::Item>> {
    let mut entries = lock(&self.entries);
    if let Some(entry) = entries.iter().find(|e| e.key.matches(&request)) {
      debug!(cursor = ?request.start_after, "joining in-flight page request");
      return Box::pin(entry.fetch.clone());
    }

    let key = Key {
      filters: request.filters.clone(),
      cursor: request.start_after.clone(),
      limit: request.limit,
    };
    let probe = Key { filters: key.filters.clone(), cursor: key.cursor.clone(), limit: key.limit };
    let upstream = self.inner.fetch_page(request);
    let registry = Arc::downgrade(&self.entries);

    let fetch: BoxFuture<FetchResult<S::Item>> = Box::pin(async move {
      let result = upstream.await;
      let keep = matches!(&result, Ok(page) if page.is_last());
      if !keep {
        if let Some(registry) = registry.upgrade() {
          lock(&registry).retain(|e| !e.key.same(&probe));
        }
      }
      result
    });
    let fetch = fetch.shared();
    entries.push(Entry { key, fetch: fetch.clone() });
    Box::pin(fetch)
  }

  fn reset_requests(&self) {
    lock(&self.entries).clear();
    self.inner.reset_requests();
  }
}
