//! Errors raised while handling pipeline events.

use serde::Serialize;
use thiserror::Error;

use crate::infrastructure::mediaconvert::EngineError;
use crate::infrastructure::notification::NotifyError;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to decode object reference {value:?}: {reason}")]
    Decode { value: String, reason: String },

    #[error("Transcoding engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Malformed output path: {0}")]
    MalformedOutputPath(String),

    #[error("Unknown job status: {0}")]
    UnknownStatus(String),

    #[error("Job {0} completed without output group details")]
    MissingOutputGroups(String),
}

impl PipelineError {
    pub fn decode(value: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decode {
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed_output_path(path: impl Into<String>) -> Self {
        Self::MalformedOutputPath(path.into())
    }

    /// Short variant name carried in notification payloads.
    pub fn name(&self) -> &'static str {
        match self {
            PipelineError::Decode { .. } => "DecodeError",
            PipelineError::Engine(_) => "TranscodingEngineError",
            PipelineError::Notify(_) => "NotificationError",
            PipelineError::MalformedOutputPath(_) => "MalformedOutputPath",
            PipelineError::UnknownStatus(_) => "UnknownJobStatus",
            PipelineError::MissingOutputGroups(_) => "MissingOutputGroups",
        }
    }
}

/// Error shape embedded in notification bodies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorPayload {
    pub name: String,
    pub message: String,
}

impl From<&PipelineError> for ErrorPayload {
    fn from(err: &PipelineError) -> Self {
        Self {
            name: err.name().to_string(),
            message: err.to_string(),
        }
    }
}
