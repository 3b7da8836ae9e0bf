/* src/client/http/src/lib.rs */

//! reqwest transport for the Creative Studio backend.
//!
//! [`Backend`] owns the HTTP client and token provider; its resource methods
//! hand out [`SearchEndpoint`]s that plug into `studio_core` loaders and page
//! tables.

pub mod auth;
pub mod backend;
pub mod filters;
pub mod models;
pub mod resources;
pub mod upload;

#[cfg(test)]
mod tests;

pub use auth::{StaticToken, TokenProvider};
pub use backend::{Backend, BackendConfig, DEFAULT_TIMEOUT, error_from_body};
pub use filters::{
  FilterRecord, GalleryFilters, SourceAssetFilters, UserAssetFilters, UserFilters, non_blank,
};
pub use models::{AssetScope, AssetType, JobStatus, MediaItem, SourceAsset, User, UserAsset, UserRole};
pub use resources::{SearchEndpoint, SearchMethod};
pub use upload::UploadRequest;
