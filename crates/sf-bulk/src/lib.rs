//! # bulkline-sf-bulk
//!
//! Job lifecycle client for the Salesforce async Bulk API (XML/CSV).
//!
//! ## Features
//!
//! - **Create** - open a job for an operation on an sObject, CSV content
//! - **Add Batch** - submit CSV records to the open job, as often as needed
//! - **Close** - mark the job closed so Salesforce finishes processing it
//!
//! Polling for completion and reading batch results are left to the caller.
//!
//! ## Example
//!
//! ```rust,ignore
//! use bulkline_sf_auth::LoginConfig;
//! use bulkline_sf_bulk::{Job, JobOperation, JobSpec};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let connection = LoginConfig::from_env()?.login().await?;
//!
//!     let spec = JobSpec::new(
//!         JobOperation::Upsert,
//!         "Account",
//!         "External_Id__c,Name\nA-1,Acme Corp\nA-2,Global Inc\n",
//!     )
//!     .with_external_id_field("External_Id__c");
//!
//!     let mut job = Job::new(connection, spec);
//!     let job_id = job.create().await?;
//!     let batch_id = job.add_batch().await?;
//!     job.close().await?;
//!
//!     println!("job {} batch {:?}", job_id, batch_id);
//!     Ok(())
//! }
//! ```

mod error;
mod job;
mod types;
mod xml;

pub use error::{Error, ErrorKind, Result};
pub use job::Job;
pub use types::*;
pub use xml::DATALOAD_NAMESPACE;
