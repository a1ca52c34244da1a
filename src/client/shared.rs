//! Shared HTTP transport
//!
//! A single `reqwest::Client` is shared by every search client so
//! connection pooling works across all calls. Per-request timeouts come
//! from [`super::config::ClientConfig`]; the connect timeout is fixed here.

use once_cell::sync::Lazy;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Time to establish the TCP connection
const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

static GLOBAL_HTTP_CLIENT: Lazy<Arc<Client>> = Lazy::new(|| {
    Arc::new(
        Client::builder()
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|e| {
                panic!("FATAL: Failed to build HTTP client: {e}. Check system TLS configuration.");
            }),
    )
});

/// Get the shared HTTP client
///
/// Returns a clone of the Arc, which is cheap (just increments ref count)
pub fn http_client() -> Arc<Client> {
    GLOBAL_HTTP_CLIENT.clone()
}
