/* src/client/core/src/debounce.rs */

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;

/// Coalesces rapid input: a value is delivered once no newer value has
/// arrived for `delay`. Only the last value of a burst is delivered, and a
/// settled value equal to the previous one is skipped.
///
/// Dropping the debouncer aborts its task and discards a pending value.
pub struct Debouncer<T> {
  tx: mpsc::UnboundedSender<T>,
  task: JoinHandle<()>,
}

impl<T> Debouncer<T>
where
  T: PartialEq + Clone + Send + 'static,
{
  /// Must be called inside a tokio runtime.
  pub fn spawn<F, Fut>(delay: Duration, mut on_settle: F) -> Self
  where
    F: FnMut(T) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
  {
    let (tx, mut rx) = mpsc::unbounded_channel::<T>();
    let task = tokio::spawn(async move {
      let mut last: Option<T> = None;
      while let Some(mut value) = rx.recv().await {
        loop {
          match time::timeout(delay, rx.recv()).await {
            Ok(Some(newer)) => value = newer,
            Ok(None) => return,
            Err(_elapsed) => break,
          }
        }
        if last.as_ref() == Some(&value) {
          continue;
        }
        last = Some(value.clone());
        on_settle(value).await;
      }
    });
    Self { tx, task }
  }

  pub fn push(&self, value: T) {
    // The receiver only goes away together with the task.
    let _ = self.tx.send(value);
  }
}

impl<T> Drop for Debouncer<T> {
  fn drop(&mut self) {
    self.task.abort();
  }
}
