//! Error types for sf-bulk.

use crate::types::{JobStage, JobState};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// A lifecycle call failed; the cause is kept as the source.
    pub(crate) fn stage_failed(
        stage: JobStage,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind: ErrorKind::Job {
                stage,
                message: cause.to_string(),
            },
            source: Some(Box::new(cause)),
        }
    }

    /// The lifecycle stage this error belongs to, if any.
    pub fn stage(&self) -> Option<JobStage> {
        match &self.kind {
            ErrorKind::Job { stage, .. } => Some(*stage),
            ErrorKind::NotCreated(stage) => Some(*stage),
            ErrorKind::InvalidState { stage, .. } => Some(*stage),
            ErrorKind::InvalidOperation(_) => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Create, add batch or close failed at the transport, HTTP or XML level.
    #[error("{}: {message}", .stage.failure_message())]
    Job { stage: JobStage, message: String },

    /// Add batch or close was called before the job was created.
    #[error("Cannot {0}: job has not been created")]
    NotCreated(JobStage),

    /// The call is not allowed in the job's current state.
    #[error("Cannot {stage}: job is {state}")]
    InvalidState { stage: JobStage, state: JobState },

    #[error("Unknown job operation: {0}")]
    InvalidOperation(String),
}
