//! # sf-client
//!
//! Core HTTP client infrastructure for the Salesforce async Bulk API.
//!
//! This crate provides the foundation the session connector and the job
//! lifecycle client are built on:
//! - A single-attempt HTTP client (`SfHttpClient`) with configurable timeouts
//! - Request building for XML, CSV and SOAP bodies
//! - Response handling with readable-or-synthesised error bodies
//! - Namespace-aware XML text extraction (`xml`)
//! - Escaping and sanitisation helpers (`security`)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (sf-bulk: create job, add batch, close job)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Connection (sf-auth)                     │
//! │  - SOAP login, holds the Session                            │
//! │  - Authenticated POST with X-SFDC-Session                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SfHttpClient                             │
//! │  - build request → write body → read status → read body     │
//! │  - Request/response tracing                                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use bulkline_sf_client::{SfHttpClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), bulkline_sf_client::Error> {
//!     let client = SfHttpClient::new(ClientConfig::default())?;
//!
//!     let response = client
//!         .execute(client.post("https://login.salesforce.com/services/Soap/u/41.0").soap(envelope, "login"))
//!         .await?;
//!
//!     let body = response.text().await?;
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
pub mod security;
pub mod xml;

pub use client::SfHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBuilder, CSV_CONTENT_TYPE, SOAP_CONTENT_TYPE, XML_CONTENT_TYPE};
pub use response::Response;

/// Default Salesforce API version.
pub const DEFAULT_API_VERSION: &str = "41.0";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("bulkline-sf-api/", env!("CARGO_PKG_VERSION"));
