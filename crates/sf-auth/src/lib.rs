//! # sf-auth
//!
//! Session connector for the Salesforce async Bulk API.
//!
//! Logging in exchanges a username and password for a [`Session`] through the
//! SOAP `login` call. The session carries the token and the tenant instance
//! host every later call is addressed to; a [`Connection`] owns it and sends
//! authenticated XML/CSV requests.
//!
//! ## Security
//!
//! - Passwords and session tokens are redacted in Debug output
//! - Tracing spans skip the password and request bodies
//! - Username and password are XML-escaped before entering the SOAP envelope
//! - Error bodies are sanitised before they reach error messages
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::collections::HashMap;
//! use bulkline_sf_auth::{login_url, Connection};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), bulkline_sf_auth::Error> {
//!     let url = login_url("41.0", false)?;
//!     let connection = Connection::login(&url, "user@example.com", "password+token", "41.0").await?;
//!
//!     println!("instance: {}", connection.session().instance_host());
//!
//!     let mut headers = HashMap::new();
//!     headers.insert("Content-Type".to_string(), "application/xml; charset=UTF-8".to_string());
//!     let body = connection.post("job", job_xml, &headers).await?;
//!
//!     Ok(())
//! }
//! ```

mod config;
mod connection;
mod error;
mod login;
mod session;

pub use config::LoginConfig;
pub use connection::{Connection, SESSION_HEADER};
pub use error::{Error, ErrorKind, Result};
pub use login::{login_url, LoginEnvironment};
pub use session::{parse_instance_host, Session};
pub use url::Url;

/// Salesforce login URL for production.
pub const PRODUCTION_LOGIN_URL: &str = "https://login.salesforce.com";

/// Salesforce login URL for sandbox.
pub const SANDBOX_LOGIN_URL: &str = "https://test.salesforce.com";

/// Path of the SOAP partner endpoint, followed by the API version.
pub const LOGIN_PATH: &str = "/services/Soap/u";

/// Path prefix of the async Bulk API, followed by the API version.
pub const ASYNC_API_PATH: &str = "/services/async";
