//! Event filters applied before a handler is invoked.

use crate::config::settings::AppConfig;
use crate::modules::completion::dto::JobStateEvent;
use crate::modules::submission::dto::UploadEvent;

/// Source suffixes that trigger a submission. Matched as written or fully
/// upper-cased.
pub const SUPPORTED_SUFFIXES: [&str; 12] = [
    ".mpg", ".mp4", ".m4v", ".mov", ".m2ts", ".wmv", ".mxf", ".mkv", ".m3u8", ".mpeg", ".webm",
    ".h264",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Accept,
    Ignore(String),
}

pub fn is_supported_video(key: &str) -> bool {
    SUPPORTED_SUFFIXES
        .iter()
        .any(|suffix| key.ends_with(suffix) || key.ends_with(&suffix.to_uppercase()))
}

pub fn admit_upload(config: &AppConfig, event: &UploadEvent) -> Admission {
    if let Some(source) = &config.source_bucket {
        if event.bucket_name != *source {
            return Admission::Ignore(format!(
                "bucket {} is not the source bucket",
                event.bucket_name
            ));
        }
    }

    if !is_supported_video(&event.key) {
        return Admission::Ignore(format!("unsupported object suffix: {}", event.key));
    }

    Admission::Accept
}

/// Only jobs tagged with this deployment's stack name are handled.
pub fn admit_job_state(config: &AppConfig, event: &JobStateEvent) -> Admission {
    match event.user_metadata.stack_name.as_deref() {
        Some(stack) if stack == config.stack_name => Admission::Accept,
        other => Admission::Ignore(format!(
            "job {} belongs to stack {}",
            event.job_id,
            other.unwrap_or("<none>")
        )),
    }
}
