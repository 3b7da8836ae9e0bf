/* src/client/http/src/auth.rs */

use studio_core::{BoxFuture, StudioError};

/// Supplies the bearer token attached to every backend request.
/// `Ok(None)` sends the request unauthenticated.
pub trait TokenProvider: Send + Sync {
  fn token(&self) -> BoxFuture<Result<Option<String>, StudioError>>;
}

/// A fixed token, e.g. read once from the environment.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
  pub fn new(token: impl Into<String>) -> Self {
    Self(Some(token.into()))
  }

  pub fn none() -> Self {
    Self(None)
  }

  /// Read the token from `var`; a missing or blank variable means no token.
  pub fn from_env(var: &str) -> Self {
    Self(std::env::var(var).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
  }

  pub fn is_set(&self) -> bool {
    self.0.is_some()
  }
}

impl TokenProvider for StaticToken {
  fn token(&self) -> BoxFuture<Result<Option<String>, StudioError>> {
    let token = self.0.clone();
    Box::pin(async move { Ok(token) })
  }
}
