//! Common test utilities for integration tests.
//!
//! Each `TestContext` owns a throwaway static directory so tests never
//! depend on the repository's `public/` folder.

use std::fs;

use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;

use vocab_backend::build_router;
use vocab_backend::config::Config;

pub const INDEX_HTML: &str = "<!doctype html><title>Vocab trainer</title>";
pub const APP_JS: &str = "console.log('app');";

/// Router over a temporary static directory.
pub struct TestContext {
    _static_dir: TempDir,
    app: Router,
}

impl TestContext {
    /// Create a context whose static directory holds `index.html` and `app.js`.
    pub fn new() -> Self {
        let static_dir = tempfile::tempdir().expect("Failed to create static dir");
        fs::write(static_dir.path().join("index.html"), INDEX_HTML)
            .expect("Failed to write index.html");
        fs::write(static_dir.path().join("app.js"), APP_JS).expect("Failed to write app.js");

        let config = Config {
            static_dir: static_dir.path().to_path_buf(),
            ..Config::default()
        };

        Self {
            app: build_router(&config),
            _static_dir: static_dir,
        }
    }

    /// Get a test server over the router.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.app.clone()).expect("Failed to start test server")
    }
}
