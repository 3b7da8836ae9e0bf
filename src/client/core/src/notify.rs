/* src/client/core/src/notify.rs */

/// Surfaces user-facing error strings (a toast, a status line, a log).
pub trait Notifier: Send + Sync {
  fn notify_error(&self, message: &str);
}

impl<F> Notifier for F
where
  F: Fn(&str) + Send + Sync,
{
  fn notify_error(&self, message: &str) {
    self(message);
  }
}
