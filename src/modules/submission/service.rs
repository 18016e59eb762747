use serde::Serialize;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::decode::{decode_bucket_name, decode_object_key};
use super::dto::{SubmitOutcome, UploadEvent};
use super::request::{JobMetadata, build_job_request};
use crate::common::error::{ErrorPayload, PipelineError, PipelineResult};
use crate::common::object_path::object_uri;
use crate::common::report::Notification;
use crate::infrastructure::notification::NotifyError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SubmitFailureBody {
    details: String,
    error: ErrorPayload,
}

pub struct SubmissionService;

impl SubmissionService {
    /// Submits one transcoding job for an uploaded source video.
    ///
    /// Failures while decoding, building or submitting are reported on the
    /// notification channel and end the invocation normally. Only a failure
    /// to send that report is returned as an error.
    pub async fn handle(state: &AppState, event: &UploadEvent) -> Result<SubmitOutcome, NotifyError> {
        debug!("EVENT: {:?}", event);

        match Self::submit(state, event).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                error!("❌ Job submission failed for {}: {}", event.key, err);
                Self::report_failure(state, &err).await?;
                Ok(SubmitOutcome::Reported {
                    error: err.to_string(),
                })
            }
        }
    }

    async fn submit(state: &AppState, event: &UploadEvent) -> PipelineResult<SubmitOutcome> {
        let source_key = decode_object_key(&event.key)?;
        let source_bucket = decode_bucket_name(&event.bucket_name)?;

        let guid = Uuid::new_v4().to_string();
        let input_path = object_uri(&source_bucket, &source_key);
        let output_path = object_uri(&state.config.destination_bucket, &guid);

        let request = build_job_request(
            &input_path,
            &output_path,
            &state.config.mediaconvert_role,
            JobMetadata {
                guid: guid.clone(),
                stack_name: state.config.stack_name.clone(),
            },
        );

        let job_id = state.engine.create_job(&request).await?;

        info!(
            guid = %guid,
            job_id = %job_id,
            size = ?event.size_bytes(),
            "🎬 Job submitted: {} -> {}",
            input_path,
            request.output_group.destination
        );

        Ok(SubmitOutcome::Submitted { guid, job_id })
    }

    async fn report_failure(state: &AppState, err: &PipelineError) -> Result<(), NotifyError> {
        let config = &state.config;
        let body = SubmitFailureBody {
            details: log_stream_url(&config.region, &config.log_group_name),
            error: ErrorPayload::from(err),
        };

        Notification::new(format!("{}: Encoding Job Submit Failed", config.stack_name), &body)?
            .send(state.notifier.as_ref(), &config.sns_topic_arn)
            .await
    }
}

pub fn log_stream_url(region: &str, log_group: &str) -> String {
    format!(
        "https://console.aws.amazon.com/cloudwatch/home?region={}#logStream:group={}",
        region, log_group
    )
}
