//! Error types for sf-auth.
//!
//! Error messages are designed to avoid exposing credentials.

/// Result type alias for sf-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sf-auth operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Connection error without an underlying cause.
    pub(crate) fn connection(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Connection(message.into()))
    }

    /// Returns true if this is a connection (login) error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Connection(_))
    }

    /// Returns the HTTP status of a rejected authenticated request.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Login failed: transport fault, non-200 status, unparsable response,
    /// or a server URL the instance host cannot be derived from.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Authenticated request answered with a status outside `[200, 400)`.
    #[error("HTTP error: {status} {message}")]
    Http { status: u16, message: String },

    /// Authenticated request failed before a response was read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),
}

impl From<bulkline_sf_client::Error> for Error {
    fn from(err: bulkline_sf_client::Error) -> Self {
        let kind = match &err.kind {
            bulkline_sf_client::ErrorKind::Http { status, message } => ErrorKind::Http {
                status: *status,
                message: message.clone(),
            },
            _ => ErrorKind::Transport(err.to_string()),
        };
        Error::with_source(kind, err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidInput(format!("Invalid URL: {}", err)), err)
    }
}
