/* src/cli/core/src/config/tests/mod.rs */

use super::loader::{CONFIG_FILE, find_studio_config, load_studio_config, parse_studio_config};


const MINIMAL: &str = r#"
[backend]
url = "http://localhost:8080/api"
"#;

#[test]
fn minimal_config_fills_defaults() {
  let config = parse_studio_config(MINIMAL).unwrap();
  assert_eq!(config.backend.token_env, "STUDIO_TOKEN");
  assert_eq!(config.backend.timeout_secs, 30);
  assert_eq!(config.gallery.page_size, 12);
  assert_eq!(config.assets.page_size, 20);
  assert_eq!(config.users.page_size, 25);
  assert_eq!(config.users.debounce().as_millis(), 400);
  assert!(config.workspace.id.is_none());
}

#[test]
fn full_config_parses() {
  let config = parse_studio_config(
    r#"
[backend]
url = "https://studio.example.com/api"
token_env = "CS_TOKEN"
timeout_secs = 5

[workspace]
id = "marketing"

[gallery]
page_size = 24

[assets]
page_size = 50

[users]
page_size = 10
debounce_ms = 250
"#,
  )
  .unwrap();
  assert_eq!(config.backend.token_env, "CS_TOKEN");
  assert_eq!(config.backend.timeout().as_secs(), 5);
  assert_eq!(config.gallery.page_size, 24);
  assert_eq!(config.users.debounce_ms, 250);
  assert_eq!(config.workspace_id(None).as_deref(), Some("marketing"));
  assert_eq!(config.workspace_id(Some("other".into())).as_deref(), Some("other"));
}

#[test]
fn backend_section_is_required() {
  assert!(parse_studio_config("[gallery]\npage_size = 12\n").is_err());
}

#[test]
fn non_http_url_is_rejected() {
  let err = parse_studio_config("[backend]\nurl = \"localhost:8080\"\n").unwrap_err();
  assert!(err.to_string().contains("backend.url"), "{err}");
}

#[test]
fn out_of_range_page_size_is_rejected() {
  let err = parse_studio_config(&format!("{MINIMAL}\n[users]\npage_size = 500\n")).unwrap_err();
  assert!(err.to_string().contains("users.page_size"), "{err}");
  assert!(parse_studio_config(&format!("{MINIMAL}\n[gallery]\npage_size = 0\n")).is_err());
}

#[test]
fn blank_workspace_is_rejected() {
  assert!(parse_studio_config(&format!("{MINIMAL}\n[workspace]\nid = \"  \"\n")).is_err());
}
