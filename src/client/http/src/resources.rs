/* src/client/http/src/resources.rs */

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use studio_core::{BoxFuture, FetchResult, PageRequest, PageSource};

use crate::backend::Backend;
use crate::filters::{FilterRecord, GalleryFilters, SourceAssetFilters, UserAssetFilters, UserFilters};
use crate::models::{MediaItem, SourceAsset, User, UserAsset};

pub const GALLERY_PATH: &str = "/gallery";
pub const SOURCE_ASSETS_SEARCH_PATH: &str = "/source_assets/search";
pub const USER_ASSETS_SEARCH_PATH: &str = "/user_assets/search";
pub const USERS_PATH: &str = "/users/";

/// How a search endpoint expects its `{limit, startAfter, ...filters}` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMethod {
  /// JSON request body.
  PostJson,
  /// Query string on a GET.
  GetQuery,
}

/// One paginated backend collection, usable as a loader or table source.
pub struct SearchEndpoint<F, T> {
  backend: Backend,
  path: &'static str,
  method: SearchMethod,
  _marker: PhantomData<fn() -> (F, T)>,
}

impl<F, T> SearchEndpoint<F, T> {
  pub fn new(backend: Backend, path: &'static str, method: SearchMethod) -> Self {
    Self { backend, path, method, _marker: PhantomData }
  }

  pub fn path(&self) -> &'static str {
    self.path
  }

  pub fn method(&self) -> SearchMethod {
    self.method
  }
}

impl<F, T> Clone for SearchEndpoint<F, T> {
  fn clone(&self) -> Self {
    Self::new(self.backend.clone(), self.path, self.method)
  }
}

impl<F, T> fmt::Debug for SearchEndpoint<F, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SearchEndpoint")
      .field("base_url", &self.backend.base_url())
      .field("path", &self.path)
      .field("method", &self.method)
      .finish()
  }
}

impl<F, T> PageSource for SearchEndpoint<F, T>
where
  F: FilterRecord + Serialize + Clone + PartialEq + Send + Sync + 'static,
  T: DeserializeOwned + Clone + Send + Sync + 'static,
{
  type Item = T;
  type Filters = F;

  fn fetch_page(&self, request: PageRequest<F>) -> BoxFuture<FetchResult<T>> {
    let backend = self.backend.clone();
    let path = self.path;
    let method = self.method;
    Box::pin(async move {
      request.filters.validate()?;
      match method {
        SearchMethod::PostJson => backend.post_json(path, &request).await,
        SearchMethod::GetQuery => backend.get_query(path, &request).await,
      }
    })
  }
}

impl Backend {
  /// Generated media for one workspace.
  pub fn gallery(&self) -> SearchEndpoint<GalleryFilters, MediaItem> {
    SearchEndpoint::new(self.clone(), GALLERY_PATH, SearchMethod::PostJson)
  }

  pub fn source_assets(&self) -> SearchEndpoint<SourceAssetFilters, SourceAsset> {
    SearchEndpoint::new(self.clone(), SOURCE_ASSETS_SEARCH_PATH, SearchMethod::PostJson)
  }

  pub fn user_assets(&self) -> SearchEndpoint<UserAssetFilters, UserAsset> {
    SearchEndpoint::new(self.clone(), USER_ASSETS_SEARCH_PATH, SearchMethod::PostJson)
  }

  /// Admin-only user listing.
  pub fn users(&self) -> SearchEndpoint<UserFilters, User> {
    SearchEndpoint::new(self.clone(), USERS_PATH, SearchMethod::GetQuery)
  }
}
