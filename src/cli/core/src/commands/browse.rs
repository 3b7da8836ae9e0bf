/* src/cli/core/src/commands/browse.rs */

// "Load more" browsing for the gallery and asset collections.

use std::sync::Arc;

use anyhow::{Result, bail};
use studio_client::{MediaItem, SourceAsset, UserAsset};
use studio_core::{Deduplicated, LoadOutcome, PageSource, PagedLoader};
use tracing::debug;

use crate::ui::{self, UiNotifier};

/// One printable line per collection item.
pub trait Row {
  fn row(&self) -> String;
}

impl Row for MediaItem {
  fn row(&self) -> String {
    let status = self.status.map_or("-", |s| s.as_str());
    let prompt = self.prompt.as_deref().map(|p| ui::truncate(p, 48)).unwrap_or_default();
    format!("{:<24} {:<11} {:<10} {:<16} {prompt}", self.id, self.mime_type, status, self.user_email)
  }
}

impl Row for SourceAsset {
  fn row(&self) -> String {
    let kind = self.asset_type.map_or("-", |t| t.as_str());
    let scope = self.scope.map_or("-", |s| s.as_str());
    format!("{:<24} {:<18} {:<8} {:<11} {}", self.id, kind, scope, self.mime_type, self.original_filename)
  }
}

impl Row for UserAsset {
  fn row(&self) -> String {
    let owner = self.user_email.as_deref().unwrap_or(&self.user_id);
    format!("{:<24} {:<11} {:<24} {}", self.id, self.mime_type, owner, self.original_filename)
  }
}

/// Loader over `source` with repeated requests collapsed and failures printed.
pub fn loader<S: PageSource>(
  source: S,
  filters: S::Filters,
  page_size: u32,
  label: &str,
) -> Result<PagedLoader<Deduplicated<S>>> {
  Ok(
    PagedLoader::builder(Deduplicated::new(source), filters)
      .page_size(page_size)
      .label(label)
      .notifier(Arc::new(UiNotifier))
      .build()?,
  )
}

/// Load up to `pages` pages, printing each page's items as it lands.
pub async fn run<S>(loader: &PagedLoader<S>, pages: u32) -> Result<()>
where
  S: PageSource,
  S::Item: Row,
{
  let mut printed = 0usize;
  for page in 1..=pages.max(1) {
    match loader.load_more().await {
      LoadOutcome::Loaded { appended, complete } => {
        let snap = loader.snapshot();
        for item in snap.items.iter().skip(printed) {
          ui::detail(&item.row());
        }
        printed = snap.len();
        debug!(page, appended, "page printed");
        if complete {
          break;
        }
      }
      LoadOutcome::Exhausted => break,
      // The notifier has already printed the message.
      LoadOutcome::Failed(err) => bail!("stopped after {printed} items ({})", err.code()),
      other => debug!(?other, "load skipped"),
    }
  }

  let snap = loader.snapshot();
  let total = snap.total.map_or_else(|| "?".to_string(), |t| t.to_string());
  ui::blank();
  if snap.all_loaded() {
    ui::ok(&format!("{} of {total} items, all loaded", snap.len()));
  } else {
    ui::arrow(&format!("{} of {total} items, more available (raise --pages)", snap.len()));
  }
  Ok(())
}
