//! Async Bulk API integration tests.

use super::common::require_connection;
use bulkline_sf_api::{Job, JobOperation, JobSpec, JobState};

#[tokio::test]
async fn test_bulk_insert_lifecycle() {
    let Some(connection) = require_connection().await else {
        return;
    };

    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let csv_data = format!(
        "Name,Industry\nBulkline Test 1 {stamp},Technology\nBulkline Test 2 {stamp},Manufacturing\n"
    );

    let mut job = Job::new(
        connection,
        JobSpec::new(JobOperation::Insert, "Account", csv_data),
    );

    let job_id = job.create().await.expect("Job creation should succeed");
    assert!(!job_id.is_empty(), "Job ID should be returned");

    let batch_id = job.add_batch().await.expect("Adding a batch should succeed");
    assert!(batch_id.is_some(), "Salesforce returns a batchInfo document");

    job.close().await.expect("Closing the job should succeed");
    assert_eq!(job.state(), JobState::Closed);
}

#[tokio::test]
async fn test_bulk_unknown_object_fails_on_create() {
    let Some(connection) = require_connection().await else {
        return;
    };

    let mut job = Job::new(
        connection,
        JobSpec::new(JobOperation::Insert, "NoSuchObject__c", "Name\nX\n"),
    );

    let err = job
        .create()
        .await
        .expect_err("Unknown sObject should be rejected");
    assert!(err.to_string().starts_with("Failed to create a job"));
    assert_eq!(job.job_id(), None);
}
