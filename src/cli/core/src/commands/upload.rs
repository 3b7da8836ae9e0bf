/* src/cli/core/src/commands/upload.rs */

use std::path::Path;

use anyhow::{Context, Result};
use studio_client::{AssetScope, AssetType, Backend, SourceAssetFilters, UploadRequest};
use studio_core::LoadOutcome;

use super::browse::{self, Row};
use crate::ui;

pub struct UploadArgs<'a> {
  pub file: &'a Path,
  pub scope: Option<AssetScope>,
  pub asset_type: Option<AssetType>,
  pub workspace_id: Option<String>,
  pub page_size: u32,
}

/// Upload a file, then show it at the top of the first page of source assets.
pub async fn run(backend: &Backend, args: UploadArgs<'_>) -> Result<()> {
  let filters =
    SourceAssetFilters { workspace_id: args.workspace_id.clone(), ..SourceAssetFilters::default() };
  let loader = browse::loader(backend.source_assets(), filters, args.page_size, "source assets")?;
  if let LoadOutcome::Failed(err) = loader.load_more().await {
    ui::warn(&format!("could not list existing assets: {}", err.code()));
  }

  let mut request = UploadRequest::from_path(args.file).await?;
  let size = request.bytes.len() as u64;
  if let Some(scope) = args.scope {
    request = request.scope(scope);
  }
  if let Some(asset_type) = args.asset_type {
    request = request.asset_type(asset_type);
  }
  if let Some(workspace_id) = args.workspace_id {
    request = request.workspace_id(workspace_id);
  }
  ui::arrow(&format!("uploading {} ({})", args.file.display(), ui::format_size(size)));

  let asset = backend
    .upload_source_asset(request)
    .await
    .with_context(|| format!("failed to upload {}", args.file.display()))?;
  ui::ok(&format!("stored as {}", asset.id));

  loader.add_item(asset);
  ui::blank();
  for item in loader.snapshot().items.iter() {
    ui::detail(&item.row());
  }
  Ok(())
}
