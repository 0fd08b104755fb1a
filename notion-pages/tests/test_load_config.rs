use serial_test::serial;
use std::env;
use std::fs::write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// A static config plus `NOTION_TOKEN` produces a full CliConfig.
#[tokio::test]
#[serial]
async fn test_load_config_success_with_all_fields() {
    let config_yaml = r#"
output_dir: ./tmp/site
site_title: Field Notes
pages:
  - 0f3c1e2a9d6b4c8e8d7a5b4c3d2e1f00
  - 1a2b3c4d5e6f47089a0b1c2d3e4f5a6b
templates_dir: ./templates
notion:
  base_url: http://localhost:9999/v1
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    env::set_var("NOTION_TOKEN", "secret_from_env");

    let config =
        notion_pages::load_config::load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.site.output_dir, PathBuf::from("./tmp/site"));
    assert_eq!(config.site.site_title, "Field Notes");
    assert_eq!(config.site.pages.len(), 2);
    assert_eq!(config.site.pages[0].as_str(), "0f3c1e2a9d6b4c8e8d7a5b4c3d2e1f00");
    assert_eq!(config.site.templates_dir, Some(PathBuf::from("./templates")));
    assert_eq!(config.site.stylesheet, None);
    assert_eq!(
        config.site.notion.base_url.as_deref(),
        Some("http://localhost:9999/v1")
    );
    assert_eq!(config.notion_token, "secret_from_env");
}

/// Optional sections default when omitted.
#[tokio::test]
#[serial]
async fn test_load_config_defaults_optional_fields() {
    let config_yaml = r#"
output_dir: ./tmp/site
site_title: Empty
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    env::set_var("NOTION_TOKEN", "secret_from_env");

    let config = notion_pages::load_config::load_config(config_file.path())
        .expect("Loader should allow an empty page list");
    assert!(config.site.pages.is_empty(), "pages should be empty");
    assert!(config.site.templates_dir.is_none());
    assert!(config.site.notion.base_url.is_none());
}

/// Without a token in the environment, loading fails and names the variable.
#[tokio::test]
#[serial]
async fn test_load_config_errors_without_token() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "output_dir: ./tmp\nsite_title: T\n").unwrap();

    env::remove_var("NOTION_TOKEN");

    let err = notion_pages::load_config::load_config(config_file.path()).unwrap_err();
    assert!(
        err.to_string().contains("NOTION_TOKEN"),
        "Token error expected, got: {err}"
    );
}

/// If the config file is not valid YAML, load_config errors and reports as such.
#[tokio::test]
#[serial]
async fn test_load_config_errors_for_invalid_file() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), b"not-yaml: [:::").unwrap();

    env::set_var("NOTION_TOKEN", "present");

    let err = notion_pages::load_config::load_config(config_file.path()).unwrap_err();
    let msg = err.to_string();
    assert!(
        msg.contains("parse") || msg.contains("YAML"),
        "Parse error expected, got: {msg}"
    );
}

/// The stylesheet is read from the configured path.
#[tokio::test]
#[serial]
async fn test_load_stylesheet_reads_configured_file() {
    let css_file = NamedTempFile::new().expect("temp file");
    write(css_file.path(), "body { margin: 0; }").unwrap();

    let config_file = NamedTempFile::new().expect("temp file");
    write(
        config_file.path(),
        format!(
            "output_dir: ./tmp\nsite_title: T\nstylesheet: {}\n",
            css_file.path().display()
        ),
    )
    .unwrap();
    env::set_var("NOTION_TOKEN", "present");

    let config = notion_pages::load_config::load_config(config_file.path()).unwrap();
    let css = notion_pages::load_config::load_stylesheet(&config.site).unwrap();
    assert_eq!(css.as_deref(), Some("body { margin: 0; }"));
}
