/* src/client/core/src/state.rs */

use std::sync::Arc;

use crate::errors::StudioError;

/// Whether more pages can be requested for the current filter set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Exhaustion {
  #[default]
  Open,
  /// The last fetch returned no next cursor.
  Complete,
  /// The last fetch failed; paging stops until a reset or new filters.
  Failed(StudioError),
}

impl Exhaustion {
  pub fn is_open(&self) -> bool {
    matches!(self, Self::Open)
  }
}

/// Published view of a loader, replayed to every new subscriber.
#[derive(Debug, Clone)]
pub struct LoaderSnapshot<T> {
  pub items: Arc<Vec<T>>,
  pub is_loading: bool,
  pub exhaustion: Exhaustion,
  /// Last server-reported total for the active filters.
  pub total: Option<u64>,
}

impl<T> LoaderSnapshot<T> {
  /// True once paging has stopped, whether by reaching the end or by failing.
  pub fn all_loaded(&self) -> bool {
    !self.exhaustion.is_open()
  }

  pub fn error(&self) -> Option<&StudioError> {
    match &self.exhaustion {
      Exhaustion::Failed(err) => Some(err),
      _ => None,
    }
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

impl<T> Default for LoaderSnapshot<T> {
  fn default() -> Self {
    Self { items: Arc::new(Vec::new()), is_loading: false, exhaustion: Exhaustion::Open, total: None }
  }
}

/// Published view of a page table.
#[derive(Debug, Clone)]
pub struct TableSnapshot<T> {
  pub rows: Arc<Vec<T>>,
  pub page_index: usize,
  pub page_size: u32,
  pub count: u64,
  pub is_loading: bool,
  pub error: Option<StudioError>,
}

impl<T> TableSnapshot<T> {
  pub(crate) fn empty(page_size: u32) -> Self {
    Self {
      rows: Arc::new(Vec::new()),
      page_index: 0,
      page_size,
      count: 0,
      is_loading: false,
      error: None,
    }
  }

  /// Number of pages implied by the server count, at least one.
  pub fn page_count(&self) -> usize {
    let size = u64::from(self.page_size.max(1));
    usize::try_from(self.count.div_ceil(size).max(1)).unwrap_or(usize::MAX)
  }
}
