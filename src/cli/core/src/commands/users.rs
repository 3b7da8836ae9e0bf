/* src/cli/core/src/commands/users.rs */

// Admin user table with random page access.

use std::time::Duration;

use anyhow::Result;
use studio_client::{SearchEndpoint, User, UserFilters, UserRole, non_blank};
use studio_core::{Debouncer, PagedTable, StudioError, TableOutcome, TableSnapshot};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::ui::{self, BOLD, DIM, RESET};

type UserTable = PagedTable<SearchEndpoint<UserFilters, User>>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
  Next,
  Previous,
  /// 1-based page number.
  Goto(usize),
  PageSize(u32),
  Filter(String),
  Quit,
  Help,
  Invalid(String),
}

fn parse_input(line: &str) -> Input {
  let line = line.trim();
  let (cmd, arg) = match line.split_once(char::is_whitespace) {
    Some((cmd, arg)) => (cmd, arg.trim()),
    None => (line, ""),
  };
  match cmd {
    "n" | "next" => Input::Next,
    "p" | "prev" => Input::Previous,
    "q" | "quit" => Input::Quit,
    "" | "h" | "help" => Input::Help,
    "g" | "goto" => match arg.parse::<usize>() {
      Ok(page) if page >= 1 => Input::Goto(page),
      _ => Input::Invalid(format!("expected a page number >= 1, got {arg:?}")),
    },
    "s" | "size" => match arg.parse::<u32>() {
      Ok(size) => Input::PageSize(size),
      Err(_) => Input::Invalid(format!("expected a page size, got {arg:?}")),
    },
    "f" | "filter" => Input::Filter(arg.to_string()),
    other => Input::Invalid(format!("unknown command {other:?}")),
  }
}

fn role_label(user: &User) -> String {
  user.effective_roles().iter().map(|r| r.as_str()).collect::<Vec<_>>().join(",")
}

fn render(snap: &TableSnapshot<User>) {
  ui::blank();
  ui::detail(&format!("{BOLD}{:<28} {:<24} {:<16}{RESET}", "EMAIL", "NAME", "ROLES"));
  if snap.rows.is_empty() {
    ui::dim("no users on this page");
  }
  for user in snap.rows.iter() {
    ui::detail(&format!(
      "{:<28} {:<24} {:<16}",
      ui::truncate(&user.email, 28),
      ui::truncate(&user.name, 24),
      role_label(user)
    ));
  }
  ui::detail(&format!(
    "{DIM}page {} of {} \u{b7} {} users \u{b7} {} per page{RESET}",
    snap.page_index + 1,
    snap.page_count(),
    snap.count,
    snap.page_size
  ));
}

fn report(table: &UserTable, result: Result<TableOutcome, StudioError>) {
  match result {
    Ok(TableOutcome::Displayed { .. }) => render(&table.snapshot()),
    Ok(TableOutcome::OutOfRange { page_index }) => {
      ui::warn(&format!("page {} is past the last page", page_index + 1));
    }
    Ok(TableOutcome::Unchanged) => ui::dim("nothing to do"),
    Ok(TableOutcome::Stale) => {}
    Err(err) => ui::fail(&err.to_string()),
  }
}

pub struct UsersArgs {
  pub page: usize,
  pub page_size: u32,
  pub email: Option<String>,
  pub role: Option<UserRole>,
  pub interactive: bool,
  pub debounce: Duration,
}

pub async fn run(endpoint: SearchEndpoint<UserFilters, User>, args: UsersArgs) -> Result<()> {
  let filters = UserFilters { email: non_blank(args.email), role: args.role };
  let table = PagedTable::new(endpoint, filters, args.page_size)?;

  let first = table.fetch_page(args.page.saturating_sub(1)).await;
  if !args.interactive {
    let outcome = first?;
    report(&table, Ok(outcome));
    return Ok(());
  }
  report(&table, first);
  interactive(&table, args.role, args.debounce).await
}

async fn interactive(table: &UserTable, role: Option<UserRole>, debounce: Duration) -> Result<()> {
  let debouncer = Debouncer::spawn(debounce, {
    let table = table.clone();
    move |text: String| {
      let table = table.clone();
      async move {
        let filters = UserFilters { email: non_blank(Some(text)), role };
        let result = table.set_filters(filters).await;
        report(&table, result);
      }
    }
  });

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  loop {
    ui::prompt("n/p, g N, s N, f TEXT, q >");
    let Some(line) = lines.next_line().await? else {
      break;
    };
    match parse_input(&line) {
      Input::Next => report(table, table.next_page().await),
      Input::Previous => report(table, table.previous_page().await),
      Input::Goto(page) => report(table, table.fetch_page(page - 1).await),
      Input::PageSize(size) => report(table, table.set_page_size(size).await),
      Input::Filter(text) => {
        ui::dim("filtering...");
        debouncer.push(text);
      }
      Input::Quit => break,
      Input::Help => {
        ui::detail("n / p      next / previous page");
        ui::detail("g N        go to page N");
        ui::detail("s N        change page size");
        ui::detail("f TEXT     filter by email (empty clears)");
        ui::detail("q          quit");
      }
      Input::Invalid(msg) => ui::warn(&msg),
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn navigation_commands() {
    assert_eq!(parse_input("n"), Input::Next);
    assert_eq!(parse_input(" prev "), Input::Previous);
    assert_eq!(parse_input("g 4"), Input::Goto(4));
    assert_eq!(parse_input("s 50"), Input::PageSize(50));
    assert_eq!(parse_input("q"), Input::Quit);
    assert_eq!(parse_input(""), Input::Help);
  }

  #[test]
  fn filter_keeps_the_rest_of_the_line() {
    assert_eq!(parse_input("f  jane@studio "), Input::Filter("jane@studio".to_string()));
    assert_eq!(parse_input("f"), Input::Filter(String::new()));
  }

  #[test]
  fn bad_arguments_are_reported() {
    assert!(matches!(parse_input("g 0"), Input::Invalid(_)));
    assert!(matches!(parse_input("g two"), Input::Invalid(_)));
    assert!(matches!(parse_input("s"), Input::Invalid(_)));
    assert!(matches!(parse_input("x"), Input::Invalid(_)));
  }

  #[test]
  fn roles_default_to_user() {
    let user = User { email: "a@b.c".to_string(), ..User::default() };
    assert_eq!(role_label(&user), "user");
    let admin = User { roles: vec![UserRole::Admin, UserRole::Creator], ..User::default() };
    assert_eq!(role_label(&admin), "admin,creator");
  }
}
