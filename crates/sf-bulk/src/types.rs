//! Types for the async Bulk API job lifecycle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

/// Async Bulk API operation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JobOperation {
    /// Insert new records
    Insert,
    /// Delete records (soft delete)
    Delete,
    /// Hard delete records (permanent)
    HardDelete,
    /// Update existing records
    Update,
    /// Upsert based on external ID
    Upsert,
    /// Query records
    Query,
}

impl JobOperation {
    /// Get the API string for this operation.
    pub fn api_name(&self) -> &'static str {
        match self {
            JobOperation::Insert => "insert",
            JobOperation::Delete => "delete",
            JobOperation::HardDelete => "hardDelete",
            JobOperation::Update => "update",
            JobOperation::Upsert => "upsert",
            JobOperation::Query => "query",
        }
    }

    /// Every operation, in wire-name order.
    pub const ALL: [JobOperation; 6] = [
        JobOperation::Insert,
        JobOperation::Delete,
        JobOperation::HardDelete,
        JobOperation::Update,
        JobOperation::Upsert,
        JobOperation::Query,
    ];
}

impl fmt::Display for JobOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

impl FromStr for JobOperation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobOperation::ALL
            .into_iter()
            .find(|op| op.api_name() == s)
            .ok_or_else(|| Error::new(ErrorKind::InvalidOperation(s.to_string())))
    }
}

/// What a job does: operation, target object and the CSV records to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    operation: JobOperation,
    object: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    external_id_field: Option<String>,
    records: String,
}

impl JobSpec {
    /// Job without an external ID field.
    pub fn new(operation: JobOperation, object: impl Into<String>, records: impl Into<String>) -> Self {
        Self {
            operation,
            object: object.into(),
            external_id_field: None,
            records: records.into(),
        }
    }

    /// Set the external ID field (`externalFieldName`) used to match upserted records.
    pub fn with_external_id_field(mut self, field: impl Into<String>) -> Self {
        self.external_id_field = Some(field.into());
        self
    }

    pub fn operation(&self) -> JobOperation {
        self.operation
    }

    pub fn object(&self) -> &str {
        &self.object
    }

    pub fn external_id_field(&self) -> Option<&str> {
        self.external_id_field.as_deref()
    }

    /// CSV payload submitted by [`Job::add_batch`](crate::Job::add_batch).
    pub fn records(&self) -> &str {
        &self.records
    }
}

/// Lifecycle call a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStage {
    Create,
    AddBatch,
    Close,
}

impl JobStage {
    /// Message of a failed call at this stage.
    pub fn failure_message(&self) -> &'static str {
        match self {
            JobStage::Create => "Failed to create a job",
            JobStage::AddBatch => "Failed to add records",
            JobStage::Close => "Failed to close the job",
        }
    }
}

impl fmt::Display for JobStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JobStage::Create => "create",
            JobStage::AddBatch => "add batch",
            JobStage::Close => "close",
        })
    }
}

/// Client-side view of where a job is in its lifecycle.
///
/// `Uncreated -> Created -> Closed`; batches are added while `Created`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Uncreated,
    Created,
    Closed,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JobState::Uncreated => "uncreated",
            JobState::Created => "created",
            JobState::Closed => "closed",
        })
    }
}
