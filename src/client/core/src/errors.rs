/* src/client/core/src/errors.rs */

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioError {
  code: String,
  message: String,
  status: Option<u16>,
}

fn code_for_status(status: u16) -> &'static str {
  match status {
    400 | 422 => "VALIDATION_ERROR",
    401 => "UNAUTHORIZED",
    403 => "FORBIDDEN",
    404 => "NOT_FOUND",
    429 => "RATE_LIMITED",
    _ => "INTERNAL_ERROR",
  }
}

impl StudioError {
  pub fn new(code: impl Into<String>, message: impl Into<String>, status: Option<u16>) -> Self {
    Self { code: code.into(), message: message.into(), status }
  }

  /// Error carried by a non-2xx backend response. The code is derived from the status.
  pub fn http(status: u16, message: impl Into<String>) -> Self {
    Self::new(code_for_status(status), message, Some(status))
  }

  /// Request never produced a response (connect failure, timeout, reset).
  pub fn transport(msg: impl Into<String>) -> Self {
    Self::new("TRANSPORT_ERROR", msg, None)
  }

  /// Response arrived but its body could not be decoded.
  pub fn decode(msg: impl Into<String>) -> Self {
    Self::new("DECODE_ERROR", msg, None)
  }

  pub fn validation(msg: impl Into<String>) -> Self {
    Self::new("VALIDATION_ERROR", msg, None)
  }

  pub fn not_found(msg: impl Into<String>) -> Self {
    Self::http(404, msg)
  }

  pub fn internal(msg: impl Into<String>) -> Self {
    Self::new("INTERNAL_ERROR", msg, None)
  }

  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn status(&self) -> Option<u16> {
    self.status
  }

  /// Transport failures, rate limiting and 5xx responses may succeed on a retry.
  pub fn is_transient(&self) -> bool {
    match self.status {
      None => self.code == "TRANSPORT_ERROR",
      Some(status) => status == 429 || status >= 500,
    }
  }
}

impl fmt::Display for StudioError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}

impl std::error::Error for StudioError {}
