use std::fs;
use std::path::Path;

use chrono::{Datelike, Utc};
use tinysite_engine::{ConfigError, Engine, EngineConfig, EngineError, page, schema};
use tinysite_store::{Ident, Record, Store};

const TPL: &str = "<h1>{{title}}</h1><p>{{content}}</p><footer>{{current_year}}</footer>";

fn test_config(docroot: &Path) -> EngineConfig {
    EngineConfig::default()
        .set_document_root(docroot)
        .set_database_path(":memory:")
}

async fn test_engine(docroot: &Path, template: &str) -> Engine {
    fs::write(docroot.join("index.tpl"), template).unwrap();
    Engine::new(test_config(docroot)).await.expect("engine")
}

#[tokio::test]
async fn render_page_shows_a_stored_page() {
    let dir = tempfile::tempdir().unwrap();
    let engine = test_engine(dir.path(), TPL).await;

    let id = engine
        .store()
        .create(
            Ident::new("page"),
            &Record::new()
                .with("title", "Hello & Goodbye")
                .with("content", "A \"quoted\" body"),
        )
        .await
        .unwrap();

    let body = page::render_page(engine.store(), engine.config(), id)
        .await
        .unwrap();
    assert!(body.contains("<h1>Hello &amp; Goodbye</h1>"), "{body}");
    assert!(body.contains("<p>A &quot;quoted&quot; body</p>"), "{body}");
}

#[tokio::test]
async fn render_page_falls_back_when_the_id_is_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let engine = test_engine(dir.path(), TPL).await;

    let body = page::render_page(engine.store(), engine.config(), 9999)
        .await
        .unwrap();
    assert!(body.contains("Page Not Found"), "{body}");
    assert!(body.contains("The requested page does not exist."), "{body}");
}

#[tokio::test]
async fn render_page_injects_the_current_year() {
    let dir = tempfile::tempdir().unwrap();
    let engine = test_engine(dir.path(), "year: {{current_year}}").await;

    let body = page::render_page(engine.store(), engine.config(), 1)
        .await
        .unwrap();
    assert_eq!(body, format!("year: {}", Utc::now().year()));
}

#[tokio::test]
async fn render_page_without_a_template_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let store = Store::connect(":memory:").await.unwrap();
    schema::initialize(&store, "page").await.unwrap();

    let err = page::render_page(&store, &config, 1)
        .await
        .expect_err("no template on disk");
    assert!(matches!(err, EngineError::Template(_)), "got {err:?}");
}

#[tokio::test]
async fn schema_initialize_seeds_exactly_once() {
    let store = Store::connect(":memory:").await.unwrap();

    schema::initialize(&store, "page").await.unwrap();
    schema::initialize(&store, "page").await.unwrap();

    assert_eq!(store.count(Ident::new("page")).await.unwrap(), 1);
    let seeded = store.read(Ident::new("page"), 1).await.unwrap().unwrap();
    assert!(seeded.get("title").is_some());
}

#[test]
fn config_defaults_match_the_site_layout() {
    let config = EngineConfig::default();
    assert_eq!(config.addr(), "127.0.0.1:3000");
    assert_eq!(config.template_path(), Path::new("templates/index.tpl"));
    assert_eq!(config.database_path, "site.db");
    assert_eq!(config.page_table, "page");
}

#[test]
fn config_file_overrides_only_named_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.toml");
    fs::write(
        &path,
        "host = \"0.0.0.0\"\nport = 8080\ndatabase_path = \"data/site.db\"\n",
    )
    .unwrap();

    let config = EngineConfig::from_file(&path).unwrap();
    assert_eq!(config.addr(), "0.0.0.0:8080");
    assert_eq!(config.database_path, "data/site.db");
    // untouched keys keep their defaults
    assert_eq!(config.index_template, "index.tpl");
    assert_eq!(config.page_table, "page");
}

#[test]
fn config_missing_file_is_not_found() {
    let err = EngineConfig::from_file("/no/such/site.toml").expect_err("must fail");
    assert!(matches!(err, ConfigError::NotFound { .. }), "got {err:?}");
}

#[test]
fn config_rejects_malformed_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.toml");
    fs::write(&path, "port = \"not a number\"").unwrap();

    let err = EngineConfig::from_file(&path).expect_err("must fail");
    assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
}
