use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::error::{PipelineError, PipelineResult};

/// "Job state changed" detail emitted by the transcoding engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobStateEvent {
    pub status: String,
    pub job_id: String,
    /// Present only once the job is COMPLETE.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_group_details: Option<Vec<OutputGroupDetail>>,
    #[serde(default)]
    pub user_metadata: JobUserMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobUserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutputGroupDetail {
    /// Absolute object references, manifest first.
    #[serde(default)]
    pub playlist_file_paths: Vec<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub group_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(value_type = Vec<Object>)]
    pub output_details: Vec<serde_json::Value>,
}

/// The statuses this pipeline reacts to. Anything else fails construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JobState<'a> {
    InputInformation,
    Complete {
        output_group_details: &'a [OutputGroupDetail],
    },
    Canceled,
    Error,
}

impl JobState<'_> {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::InputInformation => "INPUT_INFORMATION",
            JobState::Complete { .. } => "COMPLETE",
            JobState::Canceled => "CANCELED",
            JobState::Error => "ERROR",
        }
    }
}

impl JobStateEvent {
    pub fn state(&self) -> PipelineResult<JobState<'_>> {
        match self.status.as_str() {
            "INPUT_INFORMATION" => Ok(JobState::InputInformation),
            "COMPLETE" => {
                let output_group_details = self
                    .output_group_details
                    .as_deref()
                    .ok_or_else(|| PipelineError::MissingOutputGroups(self.job_id.clone()))?;
                Ok(JobState::Complete {
                    output_group_details,
                })
            }
            "CANCELED" => Ok(JobState::Canceled),
            "ERROR" => Ok(JobState::Error),
            other => Err(PipelineError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobStateOutcome {
    /// Informational status, nothing published.
    Acknowledged,
    Completed { playback_urls: Vec<String> },
    FailureNotified,
}
