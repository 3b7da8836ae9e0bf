/* src/client/http/src/upload.rs */

use std::path::Path;

use reqwest::multipart::{Form, Part};
use studio_core::StudioError;
use tracing::info;

use crate::backend::Backend;
use crate::models::{AssetScope, AssetType, SourceAsset};

pub const SOURCE_ASSETS_UPLOAD_PATH: &str = "/source_assets/upload";

/// A file to store as a source asset.
#[derive(Debug, Clone)]
pub struct UploadRequest {
  pub file_name: String,
  pub bytes: Vec<u8>,
  pub mime_type: String,
  pub scope: Option<AssetScope>,
  pub asset_type: Option<AssetType>,
  pub workspace_id: Option<String>,
}

impl UploadRequest {
  pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
    let file_name = file_name.into();
    let mime_type = guess_mime(&file_name).to_string();
    Self { file_name, bytes, mime_type, scope: None, asset_type: None, workspace_id: None }
  }

  pub async fn from_path(path: &Path) -> Result<Self, StudioError> {
    let bytes = tokio::fs::read(path)
      .await
      .map_err(|e| StudioError::validation(format!("failed to read {}: {e}", path.display())))?;
    let file_name = path
      .file_name()
      .and_then(|n| n.to_str())
      .ok_or_else(|| StudioError::validation(format!("{} has no file name", path.display())))?;
    Ok(Self::new(file_name, bytes))
  }

  pub fn scope(mut self, scope: AssetScope) -> Self {
    self.scope = Some(scope);
    self
  }

  pub fn asset_type(mut self, asset_type: AssetType) -> Self {
    self.asset_type = Some(asset_type);
    self
  }

  pub fn workspace_id(mut self, workspace_id: impl Into<String>) -> Self {
    self.workspace_id = Some(workspace_id.into());
    self
  }

  fn into_form(self) -> Result<Form, StudioError> {
    let part = Part::bytes(self.bytes)
      .file_name(self.file_name)
      .mime_str(&self.mime_type)
      .map_err(|e| StudioError::validation(format!("invalid mime type {}: {e}", self.mime_type)))?;
    let mut form = Form::new().part("file", part);
    if let Some(scope) = self.scope {
      form = form.text("scope", scope.as_str());
    }
    if let Some(asset_type) = self.asset_type {
      form = form.text("assetType", asset_type.as_str());
    }
    if let Some(workspace_id) = self.workspace_id {
      form = form.text("workspaceId", workspace_id);
    }
    Ok(form)
  }
}

fn guess_mime(file_name: &str) -> &'static str {
  let ext = file_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
  match ext.as_deref() {
    Some("png") => "image/png",
    Some("jpg" | "jpeg") => "image/jpeg",
    Some("webp") => "image/webp",
    Some("gif") => "image/gif",
    Some("mp4") => "video/mp4",
    Some("webm") => "video/webm",
    Some("mov") => "video/quicktime",
    _ => "application/octet-stream",
  }
}

impl Backend {
  /// Upload a file as a source asset. Errors are returned, never swallowed.
  pub async fn upload_source_asset(&self, upload: UploadRequest) -> Result<SourceAsset, StudioError> {
    let file_name = upload.file_name.clone();
    let size = upload.bytes.len();
    let form = upload.into_form()?;
    let asset: SourceAsset = self.post_multipart(SOURCE_ASSETS_UPLOAD_PATH, form).await?;
    info!(file = %file_name, size, id = %asset.id, "source asset uploaded");
    Ok(asset)
  }
}
