/* src/client/core/src/page.rs */

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::StudioError;

/// Opaque backend-supplied position in a result set.
pub type Cursor = String;

pub const MIN_PAGE_SIZE: u32 = 1;
pub const MAX_PAGE_SIZE: u32 = 100;

/// One page of a server-paginated collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct CollectionPage<T> {
  #[serde(default, deserialize_with = "null_as_empty")]
  pub data: Vec<T>,
  #[serde(default)]
  pub count: u64,
  #[serde(default)]
  pub next_page_cursor: Option<Cursor>,
}

impl<T> CollectionPage<T> {
  pub fn new(data: Vec<T>, count: u64, next_page_cursor: Option<Cursor>) -> Self {
    Self { data, count, next_page_cursor }
  }

  pub fn is_last(&self) -> bool {
    self.next_page_cursor.is_none()
  }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a search call: `{limit, ...filters, startAfter}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest<F> {
  pub limit: u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub start_after: Option<Cursor>,
  #[serde(flatten)]
  pub filters: F,
}

impl<F> PageRequest<F> {
  pub fn new(limit: u32, start_after: Option<Cursor>, filters: F) -> Self {
    Self { limit, start_after, filters }
  }
}

/// Reject page sizes the backend would refuse.
pub fn check_page_size(size: u32) -> Result<u32, StudioError> {
  if (MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&size) {
    Ok(size)
  } else {
    Err(StudioError::validation(format!(
      "page size {size} is outside {MIN_PAGE_SIZE}..={MAX_PAGE_SIZE}"
    )))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Clone, PartialEq, Serialize)]
  #[serde(rename_all = "camelCase")]
  struct Filters {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_email: Option<String>,
    workspace_id: String,
  }

  #[test]
  fn request_flattens_filters_and_omits_missing_cursor() {
    let req = PageRequest::new(
      12,
      None,
      Filters { user_email: None, workspace_id: "ws-1".to_string() },
    );
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json, serde_json::json!({"limit": 12, "workspaceId": "ws-1"}));
  }

  #[test]
  fn request_carries_cursor_as_start_after() {
    let req = PageRequest::new(
      5,
      Some("doc-41".to_string()),
      Filters { user_email: Some("a@b.c".to_string()), workspace_id: "ws".to_string() },
    );
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["startAfter"], "doc-41");
    assert_eq!(json["userEmail"], "a@b.c");
  }

  #[test]
  fn page_decodes_null_data_and_cursor() {
    let page: CollectionPage<u32> =
      serde_json::from_str(r#"{"data": null, "count": 0, "nextPageCursor": null}"#).unwrap();
    assert!(page.data.is_empty());
    assert!(page.is_last());
  }

  #[test]
  fn page_decodes_next_cursor() {
    let page: CollectionPage<u32> =
      serde_json::from_str(r#"{"data": [1, 2], "count": 9, "nextPageCursor": "c2"}"#).unwrap();
    assert_eq!(page.data, vec![1, 2]);
    assert_eq!(page.count, 9);
    assert_eq!(page.next_page_cursor.as_deref(), Some("c2"));
  }

  #[test]
  fn page_size_bounds() {
    assert!(check_page_size(1).is_ok());
    assert!(check_page_size(100).is_ok());
    assert_eq!(check_page_size(0).unwrap_err().code(), "VALIDATION_ERROR");
    assert!(check_page_size(101).is_err());
  }
}
