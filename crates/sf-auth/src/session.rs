//! Authenticated session state returned by the SOAP login call.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::error::{Error, Result};

/// Instance host embedded in a login `serverUrl`, e.g.
/// `https://na1.salesforce.com/services/Soap/u/41.0/00D...`.
static SERVER_INSTANCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://([A-Za-z0-9.-]{2,})\.salesforce\.com")
        .expect("static regex pattern must compile")
});

/// Derive the tenant instance host from a login `serverUrl`.
///
/// The first `https://<name>.salesforce.com` occurrence wins, and the
/// result is `<name>.salesforce.com`.
///
/// ```rust
/// use bulkline_sf_auth::parse_instance_host;
///
/// let host = parse_instance_host(
///     "https://xxxxx--sandbox.my.salesforce.com/services/Soap/u/41.0/00Dxx",
/// ).unwrap();
/// assert_eq!(host, "xxxxx--sandbox.my.salesforce.com");
/// ```
pub fn parse_instance_host(server_url: &str) -> Result<String> {
    SERVER_INSTANCE_PATTERN
        .captures(server_url)
        .and_then(|caps| caps.get(1))
        .map(|name| format!("{}.salesforce.com", name.as_str()))
        .ok_or_else(|| {
            Error::connection(format!(
                "Unable to get the server instance name:{}",
                server_url
            ))
        })
}

/// A logged-in Salesforce session.
///
/// Immutable once created and safe to share between tasks. The session id
/// is redacted in Debug output.
#[derive(Clone)]
pub struct Session {
    session_id: String,
    server_url: String,
    instance_host: String,
    api_version: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("session_id", &"[REDACTED]")
            .field("server_url", &self.server_url)
            .field("instance_host", &self.instance_host)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl Session {
    /// Build a session from a token and the `serverUrl` it was issued with.
    ///
    /// Fails with a connection error when the session id is empty or no
    /// instance host can be derived from the server URL.
    pub fn new(
        session_id: impl Into<String>,
        server_url: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Result<Self> {
        let session_id = session_id.into();
        if session_id.trim().is_empty() {
            return Err(Error::connection("Login response contained an empty sessionId"));
        }

        let server_url = server_url.into();
        let instance_host = parse_instance_host(&server_url)?;

        Ok(Self {
            session_id,
            server_url,
            instance_host,
            api_version: api_version.into(),
        })
    }

    /// The session token sent as `X-SFDC-Session`.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The SOAP server URL returned by login.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Host name of the tenant instance, e.g. `na1.salesforce.com`.
    pub fn instance_host(&self) -> &str {
        &self.instance_host
    }

    /// API version the session was opened with.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_production_instance() {
        assert_eq!(
            parse_instance_host("https://na1.salesforce.com/services/Soap/u/41.0/00D").unwrap(),
            "na1.salesforce.com"
        );
        assert_eq!(
            parse_instance_host("https://xxxxx.my.salesforce.com/services/Soap/u/41.0/xxxxxxxxxxxxxxx")
                .unwrap(),
            "xxxxx.my.salesforce.com"
        );
    }

    #[test]
    fn test_parse_sandbox_instance() {
        assert_eq!(
            parse_instance_host(
                "https://xxxxx--sandbox.my.salesforce.com/services/Soap/u/41.0/xxxxxxxxxxxxxxx"
            )
            .unwrap(),
            "xxxxx--sandbox.my.salesforce.com"
        );
    }

    #[test]
    fn test_parse_rejects_foreign_host() {
        let err = parse_instance_host("https://example.com/services/Soap/u/41.0").unwrap_err();
        assert!(err.is_connection_error());
        assert_eq!(
            err.to_string(),
            "Connection error: Unable to get the server instance name:https://example.com/services/Soap/u/41.0"
        );
    }

    #[test]
    fn test_parse_rejects_short_name_and_http() {
        assert!(parse_instance_host("https://a.salesforce.com/").is_err());
        assert!(parse_instance_host("http://na1.salesforce.com/").is_err());
    }

    #[test]
    fn test_session_accessors() {
        let session = Session::new(
            "thisissessionid",
            "https://na1.salesforce.com/services/Soap/u/41.0/00D",
            "41.0",
        )
        .unwrap();
        assert_eq!(session.session_id(), "thisissessionid");
        assert_eq!(session.instance_host(), "na1.salesforce.com");
        assert_eq!(session.api_version(), "41.0");
        assert_eq!(
            session.server_url(),
            "https://na1.salesforce.com/services/Soap/u/41.0/00D"
        );
    }

    #[test]
    fn test_session_rejects_empty_token() {
        let err = Session::new("  ", "https://na1.salesforce.com/", "41.0").unwrap_err();
        assert!(err.is_connection_error());
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session::new(
            "super_secret_session",
            "https://na1.salesforce.com/services/Soap/u/41.0/00D",
            "41.0",
        )
        .unwrap();
        let debug = format!("{:?}", session);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super_secret_session"));
        assert!(debug.contains("na1.salesforce.com"));
    }
}
