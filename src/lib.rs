//! # bulkline-sf-api
//!
//! Salesforce async Bulk API client for Rust: SOAP login plus the XML/CSV
//! job lifecycle (create job, add batch, close job).
//!
//! ## Security
//!
//! - Passwords and session tokens are redacted in Debug output
//! - Tracing/logging skips credential parameters and request bodies
//! - Error messages sanitize any session data echoed by the server
//!
//! ## Crates
//!
//! - **bulkline-sf-client** - Core HTTP client, XML extraction, escaping helpers
//! - **bulkline-sf-auth** - SOAP login, sessions, authenticated connections
//! - **bulkline-sf-bulk** - Async Bulk API jobs: create, add batch, close
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bulkline_sf_api::{Job, JobOperation, JobSpec, LoginConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // SF_USERNAME, SF_PASSWORD, SF_API_VERSION, SF_SANDBOX
//!     let connection = LoginConfig::from_env()?.login().await?;
//!
//!     let spec = JobSpec::new(JobOperation::Insert, "Account", "Name\nAcme Corp\n");
//!     let mut job = Job::new(connection, spec);
//!
//!     job.create().await?;
//!     job.add_batch().await?;
//!     job.close().await?;
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
pub use bulkline_sf_auth as auth;
pub use bulkline_sf_bulk as bulk;
pub use bulkline_sf_client as client;

// Re-export commonly used types at the top level
pub use bulkline_sf_auth::{login_url, Connection, LoginConfig, LoginEnvironment, Session};
pub use bulkline_sf_bulk::{Job, JobOperation, JobSpec, JobState};
pub use bulkline_sf_client::ClientConfig;
