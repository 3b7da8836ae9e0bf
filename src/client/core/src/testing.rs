/* src/client/core/src/testing.rs */

// Scripted in-memory page source shared by the loader and table tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::watch;

use crate::errors::StudioError;
use crate::page::{CollectionPage, Cursor, PageRequest};
use crate::source::{BoxFuture, FetchResult, PageSource};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub(crate) struct TestFilters {
  pub tag: String,
}

pub(crate) fn tag(name: &str) -> TestFilters {
  TestFilters { tag: name.to_string() }
}

type Key = (String, Option<Cursor>);

struct Script {
  pages: Mutex<HashMap<Key, FetchResult<u32>>>,
  calls: Mutex<Vec<PageRequest<TestFilters>>>,
  resets: Mutex<usize>,
  gate: watch::Sender<bool>,
}

/// Pages are keyed by (tag, cursor). Unknown keys fail with `NOT_FOUND`.
/// A gated source holds every response until `open()` is called.
#[derive(Clone)]
pub(crate) struct ScriptedSource {
  script: Arc<Script>,
}

impl ScriptedSource {
  pub fn new() -> Self {
    Self::with_gate(true)
  }

  pub fn gated() -> Self {
    Self::with_gate(false)
  }

  fn with_gate(open: bool) -> Self {
    let (gate, _) = watch::channel(open);
    Self {
      script: Arc::new(Script {
        pages: Mutex::new(HashMap::new()),
        calls: Mutex::new(Vec::new()),
        resets: Mutex::new(0),
        gate,
      }),
    }
  }

  /// Script a chain of pages for `tag`: page `i` is served for cursor
  /// `"{tag}:{i}"` (none for the first page) and points at page `i + 1`.
  pub fn chain(self, tag: &str, pages: &[&[u32]]) -> Self {
    let total = pages.iter().map(|p| p.len() as u64).sum();
    let mut cursor: Option<Cursor> = None;
    {
      let mut map = self.script.pages.lock().unwrap();
      for (i, data) in pages.iter().enumerate() {
        let next = (i + 1 < pages.len()).then(|| format!("{tag}:{}", i + 1));
        map.insert(
          (tag.to_string(), cursor.clone()),
          Ok(CollectionPage::new(data.to_vec(), total, next.clone())),
        );
        cursor = next;
      }
    }
    self
  }

  pub fn fail(self, tag: &str, cursor: Option<&str>, err: StudioError) -> Self {
    self
      .script
      .pages
      .lock()
      .unwrap()
      .insert((tag.to_string(), cursor.map(str::to_string)), Err(err));
    self
  }

  pub fn open(&self) {
    self.script.gate.send_replace(true);
  }

  pub fn shut(&self) {
    self.script.gate.send_replace(false);
  }

  pub fn calls(&self) -> Vec<PageRequest<TestFilters>> {
    self.script.calls.lock().unwrap().clone()
  }

  pub fn call_count(&self) -> usize {
    self.script.calls.lock().unwrap().len()
  }

  pub fn reset_count(&self) -> usize {
    *self.script.resets.lock().unwrap()
  }
}

impl PageSource for ScriptedSource {
  type Item = u32;
  type Filters = TestFilters;

  fn fetch_page(&self, request: PageRequest<TestFilters>) -> BoxFuture<FetchResult<u32>> {
    let key = (request.filters.tag.clone(), request.start_after.clone());
    self.script.calls.lock().unwrap().push(request);
    let result = self.script.pages.lock().unwrap().get(&key).cloned().unwrap_or_else(|| {
      Err(StudioError::not_found(format!("no page scripted for {key:?}")))
    });
    let mut gate = self.script.gate.subscribe();
    Box::pin(async move {
      let _ = gate.wait_for(|open| *open).await;
      result
    })
  }

  fn reset_requests(&self) {
    *self.script.resets.lock().unwrap() += 1;
  }
}

/// Yield until the source has seen at least `n` requests.
pub(crate) async fn wait_for_calls(source: &ScriptedSource, n: usize) {
  while source.call_count() < n {
    tokio::task::yield_now().await;
  }
}
