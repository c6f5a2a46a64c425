//! Shared helpers for integration tests against a real org.

use bulkline_sf_api::{Connection, LoginConfig};

/// Log in with `SF_USERNAME` / `SF_PASSWORD` (plus optional `SF_API_VERSION`, `SF_SANDBOX`).
///
/// Returns `None` when the credentials are not set so the calling test can
/// skip. A login failure with credentials present is a test failure.
pub async fn require_connection() -> Option<Connection> {
    let config = match LoginConfig::from_env() {
        Ok(config) => config,
        Err(_) => {
            eprintln!("SF_USERNAME/SF_PASSWORD not set, skipping integration test");
            return None;
        }
    };

    let connection = config
        .login()
        .await
        .unwrap_or_else(|e| panic!("Login as {} failed: {}", config.username(), e));
    Some(connection)
}
