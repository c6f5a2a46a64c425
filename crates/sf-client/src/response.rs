//! HTTP response handling.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::error::{Error, ErrorKind, Result};

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"00[A-Za-z0-9]{13,}[!][A-Za-z0-9_.]+").expect("token pattern is valid")
});

static SESSION_ELEMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(<(?:[A-Za-z0-9_]+:)?sessionId>)[^<]*(</)").expect("session pattern is valid")
});

/// Wrapper around an HTTP response.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// Returns true if the status is in `[200, 400)`, the range the async API treats as success.
    pub fn is_accepted(&self) -> bool {
        (200..400).contains(&self.status())
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Read the body of an error response.
    ///
    /// Falls back to `Server Response Error:<status>` when the body cannot be
    /// read or is empty, so reporting the error never fails itself.
    pub async fn error_message(self) -> String {
        let status = self.status();
        match self.inner.text().await {
            Ok(body) if !body.trim().is_empty() => sanitize_error_message(&body),
            _ => synthesized_message(status),
        }
    }

    /// Consume an error response into an `Http` error carrying its body.
    pub async fn into_error(self) -> Error {
        let status = self.status();
        let message = self.error_message().await;
        Error::new(ErrorKind::Http { status, message })
    }
}

/// Message used when an error response has no readable body.
pub(crate) fn synthesized_message(status: u16) -> String {
    format!("Server Response Error:{}", status)
}

/// Sanitize an error body before it is placed in an error message.
///
/// - Truncates messages longer than 2000 characters
/// - Removes anything that looks like an access token
/// - Removes session ids echoed back in SOAP bodies
pub(crate) fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 2000;

    let sanitized = TOKEN_PATTERN.replace_all(message, "[REDACTED_TOKEN]");
    let mut sanitized = SESSION_ELEMENT_PATTERN
        .replace_all(&sanitized, "${1}[REDACTED]${2}")
        .into_owned();

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
