/* src/client/http/src/tests/search.rs */

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use studio_core::{LoadOutcome, PageRequest, PageSource, PagedLoader, PagedTable, TableOutcome};

use super::{Recorder, backend, serve};
use crate::filters::{GalleryFilters, UserFilters};
use crate::models::{JobStatus, UserRole};

async fn gallery(
  State(rec): State<Recorder>,
  headers: HeaderMap,
  Json(body): Json<Value>,
) -> Json<Value> {
  rec.record(&headers, body.clone());
  let page = match body.get("startAfter").and_then(Value::as_str) {
    None => json!({
      "data": [
        {"id": "m1", "userEmail": "a@b.c", "mimeType": "image/png", "status": "completed"},
        {"id": "m2", "userEmail": "a@b.c", "mimeType": "image/png", "status": "completed"}
      ],
      "count": 3,
      "nextPageCursor": "m2"
    }),
    Some(_) => json!({
      "data": [{"id": "m3", "userEmail": "a@b.c", "mimeType": "video/mp4"}],
      "count": 3,
      "nextPageCursor": null
    }),
  };
  Json(page)
}

const USER_IDS: [&str; 5] = ["u0", "u1", "u2", "u3", "u4"];

async fn users(
  State(rec): State<Recorder>,
  headers: HeaderMap,
  Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
  rec.record(&headers, serde_json::to_value(&params).unwrap());
  let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
  let start = match params.get("startAfter") {
    Some(after) => USER_IDS.iter().position(|id| id == after).map_or(USER_IDS.len(), |i| i + 1),
    None => 0,
  };
  let end = (start + limit).min(USER_IDS.len());
  let data: Vec<Value> = USER_IDS[start..end]
    .iter()
    .map(|id| json!({"id": id, "email": format!("{id}@studio.test"), "roles": ["admin"]}))
    .collect();
  let next = (end < USER_IDS.len()).then(|| USER_IDS[end - 1]);
  Json(json!({"data": data, "count": USER_IDS.len(), "nextPageCursor": next}))
}

async fn rejecting(State(rec): State<Recorder>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
  rec.record(&headers, Value::Null);
  (
    StatusCode::UNPROCESSABLE_ENTITY,
    Json(json!({"detail": [{"loc": ["body", "limit"], "msg": "Input should be less than or equal to 100"}]})),
  )
}

async fn mock() -> (String, Recorder) {
  let rec = Recorder::default();
  let router = Router::new()
    .route("/gallery", post(gallery))
    .route("/users/", get(users))
    .route("/user_assets/search", post(rejecting))
    .with_state(rec.clone());
  (serve(router).await, rec)
}

#[tokio::test]
async fn gallery_pages_through_the_backend() {
  let (url, rec) = mock().await;
  let backend = backend(&url, Some("tok-123"));
  let filters = GalleryFilters {
    status: Some(JobStatus::Completed),
    user_email: Some("a@b.c".to_string()),
    ..GalleryFilters::for_workspace("ws-1")
  };
  let loader = PagedLoader::new(backend.gallery(), filters, 2).unwrap();

  assert_eq!(loader.load_more().await, LoadOutcome::Loaded { appended: 2, complete: false });
  assert_eq!(loader.load_more().await, LoadOutcome::Loaded { appended: 1, complete: true });

  let snap = loader.snapshot();
  let ids: Vec<_> = snap.items.iter().map(|m| m.id.as_str()).collect();
  assert_eq!(ids, ["m1", "m2", "m3"]);
  assert_eq!(snap.total, Some(3));
  assert!(snap.all_loaded());

  let seen = rec.seen();
  assert_eq!(seen.len(), 2);
  assert_eq!(seen[0].auth.as_deref(), Some("Bearer tok-123"));
  assert_eq!(
    seen[0].payload,
    json!({"limit": 2, "workspaceId": "ws-1", "userEmail": "a@b.c", "status": "completed"})
  );
  assert_eq!(seen[1].payload["startAfter"], "m2");
}

#[tokio::test]
async fn users_are_listed_with_query_parameters() {
  let (url, rec) = mock().await;
  let backend = backend(&url, None);
  let filters = UserFilters { email: Some("u".to_string()), role: Some(UserRole::Admin) };

  let page = backend
    .users()
    .fetch_page(PageRequest::new(2, Some("u1".to_string()), filters))
    .await
    .unwrap();
  assert_eq!(page.data.len(), 2);
  assert_eq!(page.data[0].id, "u2");
  assert_eq!(page.data[0].roles, vec![UserRole::Admin]);
  assert_eq!(page.next_page_cursor.as_deref(), Some("u3"));

  let seen = rec.seen();
  assert!(seen[0].auth.is_none());
  assert_eq!(
    seen[0].payload,
    json!({"limit": "2", "startAfter": "u1", "email": "u", "role": "admin"})
  );
}

#[tokio::test]
async fn user_table_jumps_across_pages() {
  let (url, rec) = mock().await;
  let table = PagedTable::new(backend(&url, None).users(), UserFilters::default(), 2).unwrap();

  let outcome = table.fetch_page(2).await.unwrap();
  assert_eq!(outcome, TableOutcome::Displayed { page_index: 2, rows: 1 });
  assert_eq!(table.snapshot().rows[0].id, "u4");
  assert_eq!(table.snapshot().page_count(), 3);
  assert_eq!(rec.seen().len(), 3);

  table.fetch_page(1).await.unwrap();
  assert_eq!(rec.seen().len(), 4);
  assert_eq!(rec.seen()[3].payload["startAfter"], "u1");
}

#[tokio::test]
async fn fastapi_detail_becomes_a_coded_error() {
  let (url, _rec) = mock().await;
  let loader =
    PagedLoader::new(backend(&url, None).user_assets(), Default::default(), 2).unwrap();

  match loader.load_more().await {
    LoadOutcome::Failed(err) => {
      assert_eq!(err.code(), "VALIDATION_ERROR");
      assert_eq!(err.status(), Some(422));
      assert_eq!(err.message(), "Input should be less than or equal to 100");
    }
    other => panic!("expected failure, got {other:?}"),
  }
  assert!(loader.snapshot().all_loaded());
}

#[tokio::test]
async fn missing_workspace_is_rejected_before_sending() {
  let (url, rec) = mock().await;
  let result = backend(&url, None)
    .gallery()
    .fetch_page(PageRequest::new(12, None, GalleryFilters::default()))
    .await;
  assert_eq!(result.unwrap_err().code(), "VALIDATION_ERROR");
  assert!(rec.seen().is_empty());
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let result = backend(&format!("http://{addr}/api"), None)
    .gallery()
    .fetch_page(PageRequest::new(12, None, GalleryFilters::for_workspace("ws")))
    .await;
  let err = result.unwrap_err();
  assert_eq!(err.code(), "TRANSPORT_ERROR");
  assert!(err.is_transient());
}
