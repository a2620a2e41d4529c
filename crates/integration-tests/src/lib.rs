//! Integration tests for the Souq client SDK.
//!
//! Tests run the real [`souq_client::ApiClient`] against an in-process
//! axum mock of the Souq REST API, bound to an ephemeral local port. Each
//! test builds its own router, so tests stay independent and can run in
//! parallel.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p souq-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `client_auth` - 401 refresh-and-retry protocol and session expiry
//! - `client_errors` - Error shaping and CSRF header echo
//! - `services` - Envelope unwrapping and cart pricing flow

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Arc, Mutex};

use axum::Router;
use tokio::net::TcpListener;
use url::Url;

use souq_client::config::ClientConfig;
use souq_client::http::SessionExpiredHandler;

/// A mock API server bound to an ephemeral local port.
pub struct MockServer {
    /// Base URL of the mock API, including the `/api` prefix.
    pub base_url: Url,
}

/// Spawn `router` on an ephemeral port, nested under `/api`.
///
/// The `/api` prefix is deliberate: it exercises the client's base-path
/// preservation when joining endpoint paths.
///
/// # Panics
///
/// Panics if the listener cannot be bound (test environment failure).
pub async fn spawn(router: Router) -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().expect("Failed to read local addr");

    let app = Router::new().nest("/api", router);
    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Mock server crashed");
    });

    let base_url = format!("http://{addr}/api")
        .parse()
        .expect("Failed to parse mock base URL");

    MockServer { base_url }
}

impl MockServer {
    /// Client configuration pointing at this mock.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone())
    }
}

/// Session-expired handler that records every redirect target.
///
/// Clones share the same record, so a test can keep one clone and hand
/// another to [`souq_client::ApiClient::with_handler`].
#[derive(Debug, Clone, Default)]
pub struct CapturingRedirect {
    seen: Arc<Mutex<Vec<Url>>>,
}

impl CapturingRedirect {
    /// URLs the client asked to redirect to so far.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the lock panicked.
    #[must_use]
    pub fn seen(&self) -> Vec<Url> {
        self.seen.lock().expect("redirect lock poisoned").clone()
    }
}

impl SessionExpiredHandler for CapturingRedirect {
    fn session_expired(&self, login_url: &Url) {
        self.seen
            .lock()
            .expect("redirect lock poisoned")
            .push(login_url.clone());
    }
}
