//! Async Bulk API job: create, add batches, close.

use std::collections::HashMap;

use bulkline_sf_auth::Connection;
use bulkline_sf_client::{security, CSV_CONTENT_TYPE, XML_CONTENT_TYPE};
use tracing::{debug, info, instrument};

use crate::error::{Error, ErrorKind, Result};
use crate::types::{JobSpec, JobStage, JobState};
use crate::xml::{close_job_xml, create_job_xml, parse_batch_id, parse_job_id};

/// One async Bulk API job bound to a logged-in [`Connection`].
///
/// The job id is set once by a successful [`create`](Job::create) and is
/// required by [`add_batch`](Job::add_batch) and [`close`](Job::close).
/// Each call sends exactly one request; nothing is retried and a failed
/// call does not close the job.
///
/// # Example
///
/// ```rust,ignore
/// use bulkline_sf_bulk::{Job, JobOperation, JobSpec};
///
/// let spec = JobSpec::new(JobOperation::Insert, "Account", "Name\nAcme\n");
/// let mut job = Job::new(connection, spec);
///
/// job.create().await?;
/// job.add_batch().await?;
/// job.add_batch_records("Name\nGlobex\n").await?;
/// job.close().await?;
/// ```
#[derive(Debug, Clone)]
pub struct Job {
    connection: Connection,
    spec: JobSpec,
    job_id: Option<String>,
    state: JobState,
}

impl Job {
    pub fn new(connection: Connection, spec: JobSpec) -> Self {
        Self {
            connection,
            spec,
            job_id: None,
            state: JobState::Uncreated,
        }
    }

    pub fn spec(&self) -> &JobSpec {
        &self.spec
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Server-assigned job id, `None` until created.
    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Create the job on the server and return its id.
    ///
    /// A failed create leaves the job uncreated; a response without a
    /// `jobInfo/id` counts as a failure.
    #[instrument(skip(self), fields(operation = %self.spec.operation(), object = %self.spec.object()))]
    pub async fn create(&mut self) -> Result<String> {
        if self.state != JobState::Uncreated {
            return Err(Error::new(ErrorKind::InvalidState {
                stage: JobStage::Create,
                state: self.state,
            }));
        }

        let body = create_job_xml(&self.spec);
        let response = self
            .connection
            .post("job", body, &content_type(XML_CONTENT_TYPE))
            .await
            .map_err(|e| Error::stage_failed(JobStage::Create, e))?;

        let job_id = parse_job_id(&response)
            .map_err(|e| Error::stage_failed(JobStage::Create, e))?
            .ok_or_else(|| {
                Error::stage_failed(
                    JobStage::Create,
                    bulkline_sf_client::xml::missing_element("jobInfo/id"),
                )
            })?;

        info!(job_id = %job_id, "Job created");
        self.job_id = Some(job_id.clone());
        self.state = JobState::Created;
        Ok(job_id)
    }

    /// Submit the `JobSpec` records as one batch.
    ///
    /// Returns the batch id when the response carries one.
    pub async fn add_batch(&self) -> Result<Option<String>> {
        self.add_batch_records(self.spec.records()).await
    }

    /// Submit `csv` verbatim as one batch of the job.
    ///
    /// May be called any number of times between create and close.
    #[instrument(skip(self, csv), fields(job_id = ?self.job_id, bytes = csv.len()))]
    pub async fn add_batch_records(&self, csv: &str) -> Result<Option<String>> {
        let job_id = self.require_job_id(JobStage::AddBatch)?;
        let path = format!("job/{}/batch/", security::url::encode_param(job_id));

        let response = self
            .connection
            .post(&path, csv, &content_type(CSV_CONTENT_TYPE))
            .await
            .map_err(|e| Error::stage_failed(JobStage::AddBatch, e))?;

        let batch_id = parse_batch_id(&response);
        debug!(batch_id = ?batch_id, "Batch added");
        Ok(batch_id)
    }

    /// Close the job so the server finishes processing its batches.
    ///
    /// Only requires a job id; whether a closed job accepts another close
    /// is up to the server.
    #[instrument(skip(self), fields(job_id = ?self.job_id))]
    pub async fn close(&mut self) -> Result<()> {
        let job_id = self.require_job_id(JobStage::Close)?;
        let path = format!("job/{}", security::url::encode_param(job_id));

        self.connection
            .post(&path, close_job_xml(), &content_type(XML_CONTENT_TYPE))
            .await
            .map_err(|e| Error::stage_failed(JobStage::Close, e))?;

        info!("Job closed");
        self.state = JobState::Closed;
        Ok(())
    }

    fn require_job_id(&self, stage: JobStage) -> Result<&str> {
        self.job_id
            .as_deref()
            .ok_or_else(|| Error::new(ErrorKind::NotCreated(stage)))
    }
}

fn content_type(value: &str) -> HashMap<String, String> {
    HashMap::from([("Content-Type".to_string(), value.to_string())])
}
