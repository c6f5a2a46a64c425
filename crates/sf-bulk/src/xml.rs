//! Job documents of the async Bulk API.

use bulkline_sf_client::security;
use bulkline_sf_client::xml::{text_at_path, QualifiedName};

use crate::types::JobSpec;

/// XML namespace of async Bulk API job and batch documents.
pub const DATALOAD_NAMESPACE: &str = "http://www.force.com/2009/06/asyncapi/dataload";

const JOB_ID_PATH: [QualifiedName<'static>; 2] = [
    QualifiedName::new(DATALOAD_NAMESPACE, "jobInfo"),
    QualifiedName::new(DATALOAD_NAMESPACE, "id"),
];

const BATCH_ID_PATH: [QualifiedName<'static>; 2] = [
    QualifiedName::new(DATALOAD_NAMESPACE, "batchInfo"),
    QualifiedName::new(DATALOAD_NAMESPACE, "id"),
];

/// `jobInfo` document that opens a CSV job.
///
/// `externalFieldName` is present only when the `JobSpec` names an external ID field.
pub(crate) fn create_job_xml(spec: &JobSpec) -> String {
    let external_field = spec
        .external_id_field()
        .map(|field| {
            format!(
                "<externalFieldName>{}</externalFieldName>",
                security::xml::escape(field)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><jobInfo xmlns="{}"><operation>{}</operation><object>{}</object>{}<contentType>CSV</contentType></jobInfo>"#,
        DATALOAD_NAMESPACE,
        spec.operation().api_name(),
        security::xml::escape(spec.object()),
        external_field
    )
}

/// `jobInfo` document that moves a job to `Closed`.
pub(crate) fn close_job_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><jobInfo xmlns="{}"><state>Closed</state></jobInfo>"#,
        DATALOAD_NAMESPACE
    )
}

/// Job id at `/jobInfo/id`, both elements in the dataload namespace.
pub(crate) fn parse_job_id(body: &str) -> bulkline_sf_client::Result<Option<String>> {
    Ok(text_at_path(body, &JOB_ID_PATH)?.filter(|id| !id.trim().is_empty()))
}

/// Batch id at `/batchInfo/id`; anything unparsable counts as absent.
pub(crate) fn parse_batch_id(body: &str) -> Option<String> {
    text_at_path(body, &BATCH_ID_PATH)
        .ok()
        .flatten()
        .filter(|id| !id.trim().is_empty())
}
