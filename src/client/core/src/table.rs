/* src/client/core/src/table.rs */

// Random-access pagination over forward-only cursors.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::debug;

use crate::errors::StudioError;
use crate::page::{CollectionPage, Cursor, PageRequest, check_page_size};
use crate::source::PageSource;
use crate::state::TableSnapshot;

/// Cursor that starts each known page index. Page 0 always starts with no
/// cursor and is never stored.
#[derive(Debug, Clone, Default)]
pub struct PageCursorTable {
  cursors: BTreeMap<usize, Cursor>,
}

impl PageCursorTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Highest page `<= target` whose starting cursor is known.
  pub fn nearest_known(&self, target: usize) -> (usize, Option<Cursor>) {
    match self.cursors.range(1..=target).next_back() {
      Some((&index, cursor)) => (index, Some(cursor.clone())),
      None => (0, None),
    }
  }

  /// Remember the cursor that starts `index`. Existing entries are kept.
  pub fn record(&mut self, index: usize, cursor: Cursor) {
    if index > 0 {
      self.cursors.entry(index).or_insert(cursor);
    }
  }

  pub fn cursor(&self, index: usize) -> Option<&Cursor> {
    self.cursors.get(&index)
  }

  pub fn is_known(&self, index: usize) -> bool {
    index == 0 || self.cursors.contains_key(&index)
  }

  pub fn known_pages(&self) -> Vec<usize> {
    std::iter::once(0).chain(self.cursors.keys().copied()).collect()
  }

  pub fn reset(&mut self) {
    self.cursors.clear();
  }
}

/// What a navigation call ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOutcome {
  Displayed { page_index: usize, rows: usize },
  /// An earlier page ended the collection; an empty page was published.
  OutOfRange { page_index: usize },
  /// Nothing to do (same page size, already on the first/last page).
  Unchanged,
  /// A newer navigation or a reset overtook this one; nothing was published.
  Stale,
}

struct TableState<F> {
  cursors: PageCursorTable,
  filters: F,
  page_size: u32,
  /// Bumped whenever cached cursors become invalid.
  epoch: u64,
  /// Bumped on every navigation; only the latest one may publish.
  ticket: u64,
}

struct Inner<S: PageSource> {
  source: S,
  state: Mutex<TableState<S::Filters>>,
  snapshot: watch::Sender<TableSnapshot<S::Item>>,
}

/// Page table for an admin style listing: jump to any page, caching the cursor
/// of every page discovered on the way. Clones share the same table.
pub struct PagedTable<S: PageSource> {
  inner: Arc<Inner<S>>,
}

impl<S: PageSource> Clone for PagedTable<S> {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone() }
  }
}

struct Navigation<F> {
  epoch: u64,
  ticket: u64,
  page_size: u32,
  filters: F,
}

impl<S: PageSource> PagedTable<S> {
  pub const DEFAULT_PAGE_SIZE: u32 = 25;

  pub fn new(source: S, filters: S::Filters, page_size: u32) -> Result<Self, StudioError> {
    let page_size = check_page_size(page_size)?;
    let (snapshot, _) = watch::channel(TableSnapshot::empty(page_size));
    Ok(Self {
      inner: Arc::new(Inner {
        source,
        state: Mutex::new(TableState {
          cursors: PageCursorTable::new(),
          filters,
          page_size,
          epoch: 0,
          ticket: 0,
        }),
        snapshot,
      }),
    })
  }

  fn lock(&self) -> MutexGuard<'_, TableState<S::Filters>> {
    self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
  }

  pub fn snapshot(&self) -> TableSnapshot<S::Item> {
    self.inner.snapshot.borrow().clone()
  }

  pub fn subscribe(&self) -> watch::Receiver<TableSnapshot<S::Item>> {
    self.inner.snapshot.subscribe()
  }

  pub fn page_size(&self) -> u32 {
    self.lock().page_size
  }

  pub fn filters(&self) -> S::Filters {
    self.lock().filters.clone()
  }

  /// Page indices whose starting cursor is cached.
  pub fn known_pages(&self) -> Vec<usize> {
    self.lock().cursors.known_pages()
  }

  /// Show page `target`, replaying forward from the nearest cached cursor.
  pub async fn fetch_page(&self, target: usize) -> Result<TableOutcome, StudioError> {
    let (nav, start, mut cursor) = {
      let mut state = self.lock();
      state.ticket += 1;
      let (start, cursor) = state.cursors.nearest_known(target);
      let nav = Navigation {
        epoch: state.epoch,
        ticket: state.ticket,
        page_size: state.page_size,
        filters: state.filters.clone(),
      };
      self.inner.snapshot.send_modify(|snap| {
        snap.is_loading = true;
        snap.page_size = nav.page_size;
      });
      (nav, start, cursor)
    };

    if start < target {
      debug!(from = start, to = target, "replaying pages to reach target");
    }
    for index in start..target {
      let page = match self.request(&nav, cursor.take()).await {
        Ok(page) => page,
        Err(err) => return self.fail(&nav, err),
      };
      let mut state = self.lock();
      if state.epoch != nav.epoch {
        return Ok(TableOutcome::Stale);
      }
      match page.next_page_cursor {
        Some(next) if !page.data.is_empty() => {
          state.cursors.record(index + 1, next.clone());
          if state.ticket != nav.ticket {
            debug!(page = index, target, "navigation overtaken, replay stopped");
            return Ok(TableOutcome::Stale);
          }
          cursor = Some(next);
        }
        _ => {
          if state.ticket != nav.ticket {
            return Ok(TableOutcome::Stale);
          }
          debug!(page = index, target, "collection ends before target page");
          self.inner.snapshot.send_modify(|snap| {
            snap.rows = Arc::new(Vec::new());
            snap.page_index = target;
            snap.count = page.count;
            snap.is_loading = false;
            snap.error = None;
          });
          return Ok(TableOutcome::OutOfRange { page_index: target });
        }
      }
    }

    let page = match self.request(&nav, cursor).await {
      Ok(page) => page,
      Err(err) => return self.fail(&nav, err),
    };
    let mut state = self.lock();
    if state.epoch != nav.epoch {
      return Ok(TableOutcome::Stale);
    }
    if let Some(next) = &page.next_page_cursor {
      state.cursors.record(target + 1, next.clone());
    }
    if state.ticket != nav.ticket {
      return Ok(TableOutcome::Stale);
    }
    let rows = page.data.len();
    self.inner.snapshot.send_modify(|snap| {
      snap.rows = Arc::new(page.data);
      snap.page_index = target;
      snap.count = page.count;
      snap.is_loading = false;
      snap.error = None;
    });
    Ok(TableOutcome::Displayed { page_index: target, rows })
  }

  async fn request(
    &self,
    nav: &Navigation<S::Filters>,
    cursor: Option<Cursor>,
  ) -> Result<CollectionPage<S::Item>, StudioError> {
    let request = PageRequest::new(nav.page_size, cursor, nav.filters.clone());
    self.inner.source.fetch_page(request).await
  }

  fn fail(
    &self,
    nav: &Navigation<S::Filters>,
    err: StudioError,
  ) -> Result<TableOutcome, StudioError> {
    let state = self.lock();
    if state.ticket == nav.ticket {
      self.inner.snapshot.send_modify(|snap| {
        snap.is_loading = false;
        snap.error = Some(err.clone());
      });
    }
    Err(err)
  }

  /// Change the page size. Cached cursors are only valid for the size they
  /// were discovered with, so the table is cleared and page 0 is shown.
  pub async fn set_page_size(&self, page_size: u32) -> Result<TableOutcome, StudioError> {
    let page_size = check_page_size(page_size)?;
    {
      let mut state = self.lock();
      if state.page_size == page_size {
        return Ok(TableOutcome::Unchanged);
      }
      state.page_size = page_size;
      self.invalidate(&mut state);
    }
    self.fetch_page(0).await
  }

  /// Apply new filters and go back to page 0.
  pub async fn set_filters(&self, filters: S::Filters) -> Result<TableOutcome, StudioError> {
    {
      let mut state = self.lock();
      state.filters = filters;
      self.invalidate(&mut state);
    }
    self.fetch_page(0).await
  }

  fn invalidate(&self, state: &mut TableState<S::Filters>) {
    state.cursors.reset();
    state.epoch += 1;
    self.inner.source.reset_requests();
  }

  pub async fn next_page(&self) -> Result<TableOutcome, StudioError> {
    let snap = self.snapshot();
    if snap.page_index + 1 >= snap.page_count() && snap.count > 0 {
      return Ok(TableOutcome::Unchanged);
    }
    self.fetch_page(snap.page_index + 1).await
  }

  pub async fn previous_page(&self) -> Result<TableOutcome, StudioError> {
    match self.snapshot().page_index.checked_sub(1) {
      Some(index) => self.fetch_page(index).await,
      None => Ok(TableOutcome::Unchanged),
    }
  }

  /// Fetch the page currently shown again.
  pub async fn refresh(&self) -> Result<TableOutcome, StudioError> {
    self.fetch_page(self.snapshot().page_index).await
  }
}
