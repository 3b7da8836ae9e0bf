/* src/client/http/src/backend.rs */

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use studio_core::StudioError;
use tracing::debug;

use crate::auth::TokenProvider;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct BackendConfig {
  /// API root, e.g. `http://localhost:8080/api`.
  pub base_url: String,
  pub timeout: Duration,
}

impl BackendConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self { base_url: base_url.into(), timeout: DEFAULT_TIMEOUT }
  }

  pub fn timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }
}

struct Inner {
  base_url: String,
  http: reqwest::Client,
  tokens: Arc<dyn TokenProvider>,
}

/// Shared handle to the backend API. Cheap to clone.
#[derive(Clone)]
pub struct Backend {
  inner: Arc<Inner>,
}

impl Backend {
  pub fn new(config: BackendConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, StudioError> {
    if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
      return Err(StudioError::validation(format!(
        "backend url must start with http:// or https://, got {:?}",
        config.base_url
      )));
    }
    let http = reqwest::Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(|e| StudioError::internal(format!("failed to build HTTP client: {e}")))?;
    let base_url = config.base_url.trim_end_matches('/').to_string();
    Ok(Self { inner: Arc::new(Inner { base_url, http, tokens }) })
  }

  pub fn base_url(&self) -> &str {
    &self.inner.base_url
  }

  fn url(&self, path: &str) -> String {
    format!("{}{path}", self.inner.base_url)
  }

  async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, StudioError> {
    let url = self.url(path);
    debug!(%method, %url, "backend request");
    let builder = self.inner.http.request(method, url);
    Ok(match self.inner.tokens.token().await? {
      Some(token) => builder.bearer_auth(token),
      None => builder,
    })
  }

  pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, StudioError>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let builder = self.request(Method::POST, path).await?.json(body);
    send(builder).await
  }

  pub async fn get_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, StudioError>
  where
    Q: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let builder = self.request(Method::GET, path).await?.query(query);
    send(builder).await
  }

  pub async fn post_multipart<T>(&self, path: &str, form: Form) -> Result<T, StudioError>
  where
    T: DeserializeOwned,
  {
    let builder = self.request(Method::POST, path).await?.multipart(form);
    send(builder).await
  }
}

async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, StudioError> {
  let resp = builder.send().await.map_err(transport_error)?;
  let status = resp.status();
  let body = resp.bytes().await.map_err(transport_error)?;
  if !status.is_success() {
    return Err(error_from_body(status.as_u16(), &body));
  }
  serde_json::from_slice(&body)
    .map_err(|e| StudioError::decode(format!("unexpected response body: {e}")))
}

fn transport_error(err: reqwest::Error) -> StudioError {
  if err.is_timeout() {
    StudioError::transport(format!("request timed out: {err}"))
  } else if err.is_decode() {
    StudioError::decode(err.to_string())
  } else {
    StudioError::transport(err.to_string())
  }
}

/// Turn a non-2xx response into a coded error. FastAPI reports failures as
/// `{"detail": "..."}`, or as a list of `{"msg": ...}` entries for request
/// validation; anything else falls back to the raw body.
pub fn error_from_body(status: u16, body: &[u8]) -> StudioError {
  let message = match serde_json::from_slice::<Value>(body) {
    Ok(Value::Object(map)) => match map.get("detail") {
      Some(Value::String(detail)) => Some(detail.clone()),
      Some(Value::Array(items)) => {
        let msgs: Vec<&str> =
          items.iter().filter_map(|item| item.get("msg").and_then(Value::as_str)).collect();
        (!msgs.is_empty()).then(|| msgs.join("; "))
      }
      Some(other) if !other.is_null() => Some(other.to_string()),
      _ => None,
    },
    _ => None,
  };
  let message = message.unwrap_or_else(|| {
    let raw = String::from_utf8_lossy(body).trim().to_string();
    if raw.is_empty() {
      StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("request failed")
        .to_string()
    } else {
      raw
    }
  });
  StudioError::http(status, message)
}
