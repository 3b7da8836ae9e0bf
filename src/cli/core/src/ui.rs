/* src/cli/core/src/ui.rs */

use studio_core::Notifier;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn ok(msg: &str) {
  println!("  {GREEN}\u{2713}{RESET} {msg}");
}

pub fn fail(msg: &str) {
  println!("  {RED}\u{2717}{RESET} {msg}");
}

pub fn warn(msg: &str) {
  println!("  {YELLOW}!{RESET} {msg}");
}

pub fn arrow(msg: &str) {
  println!("  {GREEN}\u{2192}{RESET} {msg}");
}

pub fn detail(msg: &str) {
  println!("        {msg}");
}

pub fn dim(msg: &str) {
  println!("        {DIM}{msg}{RESET}");
}

pub fn banner(cmd: &str) {
  println!();
  println!("  {BOLD}Creative Studio{RESET} {cmd} {DIM}v{VERSION}{RESET}");
  println!();
}

pub fn prompt(msg: &str) {
  use std::io::Write;
  print!("  {CYAN}?{RESET} {msg} ");
  let _ = std::io::stdout().flush();
}

pub fn blank() {
  println!();
}

/// Prints loader failures as red cross lines.
pub struct UiNotifier;

impl Notifier for UiNotifier {
  fn notify_error(&self, message: &str) {
    fail(message);
  }
}

pub fn format_size(bytes: u64) -> String {
  if bytes >= 1_000_000 {
    format!("{:.1} MB", bytes as f64 / 1_000_000.0)
  } else if bytes >= 1_000 {
    format!("{:.1} kB", bytes as f64 / 1_000.0)
  } else {
    format!("{bytes} B")
  }
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
  if text.chars().count() <= max {
    return text.to_string();
  }
  let kept: String = text.chars().take(max.saturating_sub(1)).collect();
  format!("{kept}\u{2026}")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sizes_are_human_readable() {
    assert_eq!(format_size(512), "512 B");
    assert_eq!(format_size(2_048), "2.0 kB");
    assert_eq!(format_size(3_500_000), "3.5 MB");
  }

  #[test]
  fn long_text_is_truncated() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a very long prompt", 6), "a ver\u{2026}");
  }
}
