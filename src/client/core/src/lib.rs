/* src/client/core/src/lib.rs */

//! Paged collection loading for Creative Studio clients.
//!
//! [`PagedLoader`] accumulates a filtered, cursor-paginated collection for
//! "load more" galleries; [`PagedTable`] gives random page access on top of
//! the same forward-only cursors. Both fetch through a [`PageSource`] and
//! publish snapshots over `tokio::sync::watch`.

pub mod debounce;
pub mod errors;
pub mod inflight;
pub mod loader;
pub mod notify;
pub mod page;
pub mod source;
pub mod state;
pub mod table;

#[cfg(test)]
mod testing;

pub use debounce::Debouncer;
pub use errors::StudioError;
pub use inflight::Deduplicated;
pub use loader::{LoadOutcome, PagedLoader, PagedLoaderBuilder};
pub use notify::Notifier;
pub use page::{CollectionPage, Cursor, MAX_PAGE_SIZE, MIN_PAGE_SIZE, PageRequest, check_page_size};
pub use source::{BoxFuture, FetchResult, PageSource};
pub use state::{Exhaustion, LoaderSnapshot, TableSnapshot};
pub use table::{PageCursorTable, PagedTable, TableOutcome};
