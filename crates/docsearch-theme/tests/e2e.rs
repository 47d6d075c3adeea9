//! End-to-end tests for the search theme.
//!
//! These tests load a site configuration from disk, run the plugin through a
//! full build and inspect the output directory.

use std::{
    fs,
    io::Write,
    path::Path,
    sync::{Arc, Mutex},
};

use docsearch_core::{Config, LoadContext};
use docsearch_theme::{
    Builder, Plugin, PostBuildProps, RouteCollector, SearchTheme, build::BuildError,
    opensearch::OPENSEARCH_FILENAME,
};

fn write_config(dir: &Path, search_page: &str, base_url: &str) -> Config {
    let path = dir.join("config.toml");
    fs::write(
        &path,
        format!(
            r#"
[site]
title = "My Site"
url = "https://x.io"
base_url = "{base_url}"
favicon = "/img/icon.png"

[i18n]
default_locale = "en"
locales = ["en", "fr"]

[theme.algolia]
app_id = "APPID"
api_key = "KEY"
index_name = "docs"
search_page = {search_page}
"#
        ),
    )
    .expect("write config");
    Config::load(&path).expect("Config should load")
}

/// Captures formatted log output.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().expect("log lock").clone()).expect("utf-8 logs")
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("log lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_full_build_writes_discovery_document() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = write_config(dir.path(), "\"search\"", "/");
    let out = dir.path().join("build");

    let stats = Builder::new(&out)
        .with_plugin(SearchTheme::new(&LoadContext::new(&config)))
        .build()
        .expect("build");

    assert_eq!(stats.routes.len(), 1);
    assert_eq!(stats.routes[0].path, "/search");
    assert!(stats.routes[0].exact);
    assert_eq!(stats.head_tags.len(), 1);
    assert_eq!(stats.head_tags[0].attribute("href"), Some("/opensearch.xml"));
    assert!(stats.messages > 0);

    let xml = fs::read_to_string(out.join(OPENSEARCH_FILENAME)).expect("read opensearch.xml");
    assert!(xml.contains("<ShortName>My Site</ShortName>"));
    assert!(xml.contains("<moz:SearchForm>https://x.io/</moz:SearchForm>"));
    assert!(xml.contains(r#"template="https://x.io/search?q={searchTerms}""#));
    assert!(xml.contains(
        r#"<Image width="16" height="16" type="image/x-icon">https://x.io/img/icon.png</Image>"#
    ));
}

#[test]
fn test_disabled_search_page_produces_nothing() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = write_config(dir.path(), "false", "/docs/");
    let theme = SearchTheme::new(&LoadContext::new(&config));
    let out = dir.path().join("build");
    fs::create_dir_all(&out).expect("create out dir");

    let mut routes = RouteCollector::new();
    theme.content_loaded(&mut routes).expect("content loaded");
    assert!(routes.routes().is_empty());

    theme
        .post_build(&PostBuildProps { out_dir: &out })
        .expect("post build");
    assert!(!out.join(OPENSEARCH_FILENAME).exists());

    assert!(theme.inject_html_tags().is_empty());
}

#[test]
fn test_search_page_under_base_url() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = write_config(dir.path(), "\"/search\"", "/docs/");
    let theme = SearchTheme::new(&LoadContext::new(&config));

    let mut routes = RouteCollector::new();
    theme.content_loaded(&mut routes).expect("content loaded");

    assert_eq!(routes.routes().len(), 1);
    assert_eq!(routes.routes()[0].path, "/docs/search");
    assert_eq!(routes.routes()[0].component, "@theme/SearchPage");
    assert!(routes.routes()[0].exact);
}

#[test]
fn test_localized_build() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = write_config(dir.path(), "\"search\"", "/docs/");
    let context = LoadContext::for_locale(&config, "fr").expect("fr context");
    let out = context.out_dir(&dir.path().join("build"));

    let theme = SearchTheme::new(&context);
    let messages = theme
        .default_code_translation_messages()
        .expect("translations");
    assert_eq!(
        messages.get("theme.SearchBar.label").map(String::as_str),
        Some("Chercher")
    );

    let stats = Builder::new(&out).with_plugin(theme).build().expect("build");
    assert_eq!(stats.routes[0].path, "/docs/fr/search");

    let xml = fs::read_to_string(out.join(OPENSEARCH_FILENAME)).expect("read opensearch.xml");
    assert!(xml.contains("<moz:SearchForm>https://x.io/docs/fr/</moz:SearchForm>"));
    assert!(xml.contains(">https://x.io/docs/fr/img/icon.png</Image>"));
}

#[test]
fn test_write_failure_is_logged_and_propagated() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = write_config(dir.path(), "\"search\"", "/");
    let theme = SearchTheme::new(&LoadContext::new(&config));

    // A regular file where the output directory should be.
    let out = dir.path().join("not-a-dir");
    fs::write(&out, "occupied").expect("write blocker");

    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        theme.post_build(&PostBuildProps { out_dir: &out })
    });

    let err = result.expect_err("write must fail");
    assert!(err.as_io().is_some(), "original io error expected, got {err:?}");

    let output = logs.contents();
    assert!(output.contains("ERROR"), "logs: {output}");
    assert!(output.contains("Generating OpenSearch file failed."), "logs: {output}");
}

#[test]
fn test_write_failure_aborts_build() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = write_config(dir.path(), "\"search\"", "/");
    let out = dir.path().join("build");
    // A directory where the description file should be written.
    fs::create_dir_all(out.join(OPENSEARCH_FILENAME)).expect("create blocker");

    let err = Builder::new(&out)
        .with_plugin(SearchTheme::new(&LoadContext::new(&config)))
        .build()
        .expect_err("build must fail");

    match err {
        BuildError::Plugin { hook, source, .. } => {
            assert_eq!(hook, "post_build");
            assert!(source.as_io().is_some());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_rebuild_is_byte_identical() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = write_config(dir.path(), "\"search\"", "/");
    let out = dir.path().join("build");
    let builder =
        Builder::new(&out).with_plugin(SearchTheme::new(&LoadContext::new(&config)));

    builder.build().expect("first build");
    let first = fs::read(out.join(OPENSEARCH_FILENAME)).expect("read first");
    builder.build().expect("second build");
    let second = fs::read(out.join(OPENSEARCH_FILENAME)).expect("read second");

    assert_eq!(first, second);
}
