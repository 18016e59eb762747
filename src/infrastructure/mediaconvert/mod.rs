use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::modules::submission::request::JobRequest;

pub mod client;
pub mod convert;

pub use client::MediaConvertService;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid job settings: {0}")]
    InvalidRequest(String),

    #[error("CreateJob failed: {0}")]
    CreateJob(String),

    #[error("GetJob failed for {job_id}: {message}")]
    GetJob { job_id: String, message: String },

    #[error("Job not found: {0}")]
    NotFound(String),
}

/// The engine's view of a job, reduced to what notifications need.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    pub status: Option<String>,
    pub input_file: Option<String>,
    /// The first input as submitted. The engine keeps no probe results.
    pub input_details: serde_json::Value,
    pub user_metadata: HashMap<String, String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscodingEngine: Send + Sync {
    /// Submits the job and returns the engine's job id.
    async fn create_job(&self, request: &JobRequest) -> Result<String, EngineError>;

    async fn get_job(&self, job_id: &str) -> Result<JobRecord, EngineError>;
}
