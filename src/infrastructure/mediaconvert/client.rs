use async_trait::async_trait;
use aws_sdk_mediaconvert::Client;
use aws_sdk_mediaconvert::config::Builder;
use aws_sdk_mediaconvert::error::DisplayErrorContext;
use aws_sdk_mediaconvert::types::{Input, Job};
use serde_json::json;
use tracing::{debug, info};

use super::convert;
use super::{EngineError, JobRecord, TranscodingEngine};
use crate::modules::submission::request::JobRequest;

#[derive(Clone)]
pub struct MediaConvertService {
    client: Client,
}

impl MediaConvertService {
    /// MediaConvert is addressed through the account-specific endpoint.
    pub fn new(sdk_config: &aws_config::SdkConfig, endpoint: &str) -> Self {
        let config = Builder::from(sdk_config).endpoint_url(endpoint).build();

        info!("✅ MediaConvert client ready ({})", endpoint);

        Self {
            client: Client::from_conf(config),
        }
    }
}

#[async_trait]
impl TranscodingEngine for MediaConvertService {
    async fn create_job(&self, request: &JobRequest) -> Result<String, EngineError> {
        let output = self
            .client
            .create_job()
            .queue(&request.queue)
            .role(&request.role)
            .settings(convert::job_settings(request))
            .acceleration_settings(convert::acceleration_settings(request)?)
            .status_update_interval(convert::status_update_interval(
                request.status_update_interval_secs,
            ))
            .user_metadata("guid", &request.user_metadata.guid)
            .user_metadata("stackName", &request.user_metadata.stack_name)
            .send()
            .await
            .map_err(|e| EngineError::CreateJob(DisplayErrorContext(&e).to_string()))?;

        let job_id = created_job_id(output.job())?;

        debug!("MediaConvert accepted job {}", job_id);
        Ok(job_id)
    }

    async fn get_job(&self, job_id: &str) -> Result<JobRecord, EngineError> {
        let output = self
            .client
            .get_job()
            .id(job_id)
            .send()
            .await
            .map_err(|e| EngineError::GetJob {
                job_id: job_id.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let job = output
            .job()
            .ok_or_else(|| EngineError::NotFound(job_id.to_string()))?;

        Ok(job_record(job_id, job))
    }
}

fn created_job_id(job: Option<&Job>) -> Result<String, EngineError> {
    job.and_then(|job| job.id())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| EngineError::CreateJob("response carried no job id".to_string()))
}

fn job_record(job_id: &str, job: &Job) -> JobRecord {
    let first_input = job.settings().and_then(|s| s.inputs().first());

    JobRecord {
        id: job.id().unwrap_or(job_id).to_string(),
        status: job.status().map(|s| s.as_str().to_string()),
        input_file: first_input.and_then(|i| i.file_input()).map(str::to_string),
        input_details: first_input.map(input_details).unwrap_or_default(),
        user_metadata: job.user_metadata().cloned().unwrap_or_default(),
    }
}

/// GetJob carries no probe data for the source, so the details describe the
/// first input as it was submitted: file, timecode source, audio selector
/// names and color space handling.
fn input_details(input: &Input) -> serde_json::Value {
    let mut audio_selectors: Vec<&str> = input
        .audio_selectors()
        .map(|selectors| selectors.keys().map(String::as_str).collect())
        .unwrap_or_default();
    audio_selectors.sort_unstable();

    json!({
        "fileInput": input.file_input(),
        "timecodeSource": input.timecode_source().map(|t| t.as_str()),
        "audioSelectors": audio_selectors,
        "colorSpace": input
            .video_selector()
            .and_then(|v| v.color_space())
            .map(|c| c.as_str()),
    })
}
