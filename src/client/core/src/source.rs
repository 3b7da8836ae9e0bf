/* src/client/core/src/source.rs */

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::errors::StudioError;
use crate::page::{CollectionPage, PageRequest};

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

pub type FetchResult<T> = Result<CollectionPage<T>, StudioError>;

/// A server-paginated collection that can be queried one page at a time.
///
/// The returned future owns everything it needs, so it can outlive the borrow
/// of `self` and be aborted by the caller.
pub trait PageSource: Send + Sync + 'static {
  type Item: Clone + Send + Sync + 'static;
  type Filters: Clone + PartialEq + Send + Sync + 'static;

  fn fetch_page(&self, request: PageRequest<Self::Filters>) -> BoxFuture<FetchResult<Self::Item>>;

  /// Forget any memoized requests. Called whenever a loader resets.
  fn reset_requests(&self) {}
}

impl<S: PageSource> PageSource for Arc<S> {
  type Item = S::Item;
  type Filters = S::Filters;

  fn fetch_page(&self, request: PageRequest<Self::Filters>) -> BoxFuture<FetchResult<Self::Item>> {
    (**self).fetch_page(request)
  }

  fn reset_requests(&self) {
    (**self).reset_requests();
  }
}
