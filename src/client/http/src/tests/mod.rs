/* src/client/http/src/tests/mod.rs */

// In-process mock backend for the transport tests.

mod search;

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::HeaderMap;
use serde_json::Value;

use crate::auth::StaticToken;
use crate::backend::{Backend, BackendConfig};

#[derive(Debug, Clone)]
pub(super) struct Seen {
  pub auth: Option<String>,
  pub payload: Value,
}

#[derive(Clone, Default)]
pub(super) struct Recorder(Arc<Mutex<Vec<Seen>>>);

impl Recorder {
  pub fn record(&self, headers: &HeaderMap, payload: Value) {
    let auth = headers.get("authorization").and_then(|v| v.to_str().ok()).map(str::to_string);
    self.0.lock().unwrap().push(Seen { auth, payload });
  }

  pub fn seen(&self) -> Vec<Seen> {
    self.0.lock().unwrap().clone()
  }
}

/// Serve `router` under `/api` on an ephemeral port and return the API root.
pub(super) async fn serve(router: Router) -> String {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  let app = Router::new().nest("/api", router);
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });
  format!("http://{addr}/api")
}

pub(super) fn backend(base_url: &str, token: Option<&str>) -> Backend {
  let tokens = match token {
    Some(t) => StaticToken::new(t),
    None => StaticToken::none(),
  };
  Backend::new(BackendConfig::new(base_url), Arc::new(tokens)).unwrap()
}
