/* src/client/http/src/filters.rs */

// Filter records sent alongside `limit`/`startAfter` on each search call.

use serde::Serialize;
use studio_core::StudioError;

use crate::models::{AssetScope, AssetType, JobStatus, UserRole};

/// A filter record that can be checked before any request is made.
pub trait FilterRecord {
  fn validate(&self) -> Result<(), StudioError> {
    Ok(())
  }
}

/// Treat blank text inputs as "no filter".
pub fn non_blank(value: Option<String>) -> Option<String> {
  value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryFilters {
  pub workspace_id: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user_email: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mime_type: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub model: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status: Option<JobStatus>,
}

impl GalleryFilters {
  pub fn for_workspace(workspace_id: impl Into<String>) -> Self {
    Self { workspace_id: workspace_id.into(), ..Self::default() }
  }
}

impl FilterRecord for GalleryFilters {
  fn validate(&self) -> Result<(), StudioError> {
    if self.workspace_id.trim().is_empty() {
      return Err(StudioError::validation("gallery search requires a workspace id"));
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAssetFilters {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub workspace_id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub original_filename: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub scope: Option<AssetScope>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub asset_type: Option<AssetType>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mime_type: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user_email: Option<String>,
}

impl FilterRecord for SourceAssetFilters {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAssetFilters {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mime_type: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user_email: Option<String>,
}

impl FilterRecord for UserAssetFilters {}

/// Admin user listing. Sent as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilters {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub role: Option<UserRole>,
}

impl FilterRecord for UserFilters {}
