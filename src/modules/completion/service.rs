use serde::Serialize;
use tracing::{debug, info, warn};

use super::dto::{JobState, JobStateEvent, JobStateOutcome};
use super::playback::playback_urls;
use crate::common::error::PipelineResult;
use crate::common::events::EventEnvelope;
use crate::common::report::{ErrorReporter, Notification};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct JobCompleteBody<'a> {
    id: &'a str,
    input_file: Option<&'a str>,
    input_details: &'a serde_json::Value,
    outputs: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct JobFailedBody<'a> {
    details: String,
    error_msg: &'a EventEnvelope<JobStateEvent>,
}

pub struct CompletionService;

impl CompletionService {
    /// Reacts to a job status change.
    ///
    /// Every error is reported once on the notification channel and then
    /// returned, so the caller still sees the invocation fail.
    pub async fn handle(
        state: &AppState,
        envelope: &EventEnvelope<JobStateEvent>,
    ) -> PipelineResult<JobStateOutcome> {
        let config = &state.config;
        let reporter = ErrorReporter::new(
            state.notifier.as_ref(),
            &config.sns_topic_arn,
            &config.stack_name,
        );

        reporter
            .guard(Some(&envelope.detail.job_id), Self::dispatch(state, envelope))
            .await
    }

    async fn dispatch(
        state: &AppState,
        envelope: &EventEnvelope<JobStateEvent>,
    ) -> PipelineResult<JobStateOutcome> {
        let config = &state.config;
        let event = &envelope.detail;
        let job_id = event.job_id.as_str();

        match event.state()? {
            JobState::InputInformation => {
                debug!("Job {} reported input information", job_id);
                Ok(JobStateOutcome::Acknowledged)
            }
            JobState::Complete {
                output_group_details,
            } => {
                let job = state.engine.get_job(job_id).await?;
                let outputs = playback_urls(&config.cloudfront_domain, output_group_details)?;

                let body = JobCompleteBody {
                    id: job_id,
                    input_file: job.input_file.as_deref(),
                    input_details: &job.input_details,
                    outputs: &outputs,
                };
                Notification::new(job_subject(&config.stack_name, "COMPLETE", job_id), &body)?
                    .send(state.notifier.as_ref(), &config.sns_topic_arn)
                    .await?;

                info!("✅ Job {} complete, {} playback url(s)", job_id, outputs.len());
                Ok(JobStateOutcome::Completed {
                    playback_urls: outputs,
                })
            }
            failed @ (JobState::Canceled | JobState::Error) => {
                warn!("Job {} ended with status {}", job_id, failed.as_str());

                let body = JobFailedBody {
                    details: job_console_url(&config.region, job_id),
                    error_msg: envelope,
                };
                Notification::new(job_subject(&config.stack_name, failed.as_str(), job_id), &body)?
                    .send(state.notifier.as_ref(), &config.sns_topic_arn)
                    .await?;

                Ok(JobStateOutcome::FailureNotified)
            }
        }
    }
}

fn job_subject(stack_name: &str, status: &str, job_id: &str) -> String {
    format!("{}: Job {} id:{}", stack_name, status, job_id)
}

pub fn job_console_url(region: &str, job_id: &str) -> String {
    format!(
        "https://console.aws.amazon.com/mediaconvert/home?region={}#/jobs/summary/{}",
        region, job_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use serde_json::json;

    use crate::common::error::PipelineError;
    use crate::config::settings::tests::test_config;
    use crate::infrastructure::mediaconvert::{EngineError, JobRecord, MockTranscodingEngine};
    use crate::infrastructure::notification::{MockNotificationChannel, NotifyError};
    use crate::modules::completion::dto::{JobUserMetadata, OutputGroupDetail};

    const JOB_ID: &str = "1700000000000-abc123";

    fn state(engine: MockTranscodingEngine, notifier: MockNotificationChannel) -> AppState {
        AppState::new(test_config(), Arc::new(engine), Arc::new(notifier))
    }

    fn envelope(status: &str, groups: Option<Vec<OutputGroupDetail>>) -> EventEnvelope<JobStateEvent> {
        EventEnvelope::new(JobStateEvent {
            status: status.to_string(),
            job_id: JOB_ID.to_string(),
            output_group_details: groups,
            user_metadata: JobUserMetadata {
                stack_name: Some("VodStack".to_string()),
                guid: None,
            },
        })
    }

    fn group(path: &str) -> OutputGroupDetail {
        OutputGroupDetail {
            playlist_file_paths: vec![path.to_string()],
            group_type: Some("HLS_GROUP".to_string()),
            output_details: Vec::new(),
        }
    }

    fn job_record() -> JobRecord {
        JobRecord {
            id: JOB_ID.to_string(),
            status: Some("COMPLETE".to_string()),
            input_file: Some("s3://vod-source/movie.mp4".to_string()),
            input_details: json!({ "fileInput": "s3://vod-source/movie.mp4" }),
            user_metadata: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn input_information_publishes_nothing() {
        let mut engine = MockTranscodingEngine::new();
        engine.expect_get_job().times(0);
        let mut notifier = MockNotificationChannel::new();
        notifier.expect_publish().times(0);

        let outcome = CompletionService::handle(&state(engine, notifier), &envelope("INPUT_INFORMATION", None))
            .await
            .unwrap();

        assert_eq!(outcome, JobStateOutcome::Acknowledged);
    }

    #[tokio::test]
    async fn complete_publishes_playback_urls_for_every_group() {
        let mut engine = MockTranscodingEngine::new();
        engine
            .expect_get_job()
            .withf(|id| id == JOB_ID)
            .times(1)
            .returning(|_| Ok(job_record()));

        let mut notifier = MockNotificationChannel::new();
        notifier
            .expect_publish()
            .withf(|topic, subject, body| {
                let outputs = body["Outputs"].as_array();
                topic == "arn:aws:sns:us-east-1:123456789012:VodStack-Topic"
                    && subject == "VodStack: Job COMPLETE id:1700000000000-abc123"
                    && body["Id"] == JOB_ID
                    && body["InputFile"] == "s3://vod-source/movie.mp4"
                    && body["InputDetails"]["fileInput"] == "s3://vod-source/movie.mp4"
                    && outputs.is_some_and(|o| {
                        o.len() == 2
                            && o.iter().all(|u| {
                                u.as_str().is_some_and(|u| u.starts_with("https://cdn.example.com/"))
                            })
                    })
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let groups = vec![
            group("s3://dest/GUID123/AppleHLS1/movie.m3u8"),
            group("s3://dest/GUID123/AppleHLS2/movie.m3u8"),
        ];
        let outcome = CompletionService::handle(&state(engine, notifier), &envelope("COMPLETE", Some(groups)))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            JobStateOutcome::Completed {
                playback_urls: vec![
                    "https://cdn.example.com/GUID123/AppleHLS1/movie.m3u8".to_string(),
                    "https://cdn.example.com/GUID123/AppleHLS2/movie.m3u8".to_string(),
                ]
            }
        );
    }

    #[tokio::test]
    async fn error_status_links_the_job_console() {
        let mut engine = MockTranscodingEngine::new();
        engine.expect_get_job().times(0);

        let mut notifier = MockNotificationChannel::new();
        notifier
            .expect_publish()
            .withf(|_, subject, body| {
                let details = body["Details"].as_str().unwrap_or_default();
                subject == "VodStack: Job ERROR id:1700000000000-abc123"
                    && details.contains("region=us-east-1")
                    && details.ends_with(JOB_ID)
                    && body["ErrorMsg"]["detail"]["jobId"] == JOB_ID
                    && body["ErrorMsg"]["detail"]["status"] == "ERROR"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let outcome = CompletionService::handle(&state(engine, notifier), &envelope("ERROR", None))
            .await
            .unwrap();

        assert_eq!(outcome, JobStateOutcome::FailureNotified);
    }

    #[tokio::test]
    async fn canceled_status_is_named_in_the_subject() {
        let mut notifier = MockNotificationChannel::new();
        notifier
            .expect_publish()
            .withf(|_, subject, _| subject == "VodStack: Job CANCELED id:1700000000000-abc123")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let outcome = CompletionService::handle(
            &state(MockTranscodingEngine::new(), notifier),
            &envelope("CANCELED", None),
        )
        .await
        .unwrap();

        assert_eq!(outcome, JobStateOutcome::FailureNotified);
    }

    #[tokio::test]
    async fn unknown_status_is_reported_once_then_fails() {
        let mut notifier = MockNotificationChannel::new();
        notifier
            .expect_publish()
            .withf(|_, subject, body| {
                subject == "VodStack: Job PROCESSING ERROR id:1700000000000-abc123"
                    && body["Error"]["Message"] == "Unknown job status: PAUSED"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let result = CompletionService::handle(
            &state(MockTranscodingEngine::new(), notifier),
            &envelope("PAUSED", None),
        )
        .await;

        assert!(matches!(result, Err(PipelineError::UnknownStatus(_))));
    }

    #[tokio::test]
    async fn engine_lookup_failure_is_reported_then_fails() {
        let mut engine = MockTranscodingEngine::new();
        engine.expect_get_job().times(1).returning(|id| {
            Err(EngineError::GetJob {
                job_id: id.to_string(),
                message: "NotFoundException".to_string(),
            })
        });

        let mut notifier = MockNotificationChannel::new();
        notifier
            .expect_publish()
            .withf(|_, subject, body| {
                subject.contains("PROCESSING ERROR") && body["Error"]["Name"] == "TranscodingEngineError"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let result = CompletionService::handle(
            &state(engine, notifier),
            &envelope("COMPLETE", Some(vec![group("s3://dest/GUID123/AppleHLS1/movie.m3u8")])),
        )
        .await;

        assert!(matches!(result, Err(PipelineError::Engine(_))));
    }

    #[tokio::test]
    async fn malformed_output_path_is_reported_then_fails() {
        let mut engine = MockTranscodingEngine::new();
        engine.expect_get_job().returning(|_| Ok(job_record()));

        let mut notifier = MockNotificationChannel::new();
        notifier
            .expect_publish()
            .withf(|_, _, body| body["Error"]["Name"] == "MalformedOutputPath")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let result = CompletionService::handle(
            &state(engine, notifier),
            &envelope("COMPLETE", Some(vec![group("dest/GUID123/movie.m3u8")])),
        )
        .await;

        assert!(matches!(result, Err(PipelineError::MalformedOutputPath(_))));
    }

    #[tokio::test]
    async fn failed_completion_publish_is_reported_as_processing_error() {
        let mut engine = MockTranscodingEngine::new();
        engine.expect_get_job().returning(|_| Ok(job_record()));

        let mut notifier = MockNotificationChannel::new();
        let mut seq = mockall::Sequence::new();
        notifier
            .expect_publish()
            .withf(|_, subject, _| subject.contains("Job COMPLETE"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Err(NotifyError::Publish("throttled".to_string())));
        notifier
            .expect_publish()
            .withf(|_, subject, _| subject.contains("PROCESSING ERROR"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let result = CompletionService::handle(
            &state(engine, notifier),
            &envelope("COMPLETE", Some(vec![group("s3://dest/GUID123/AppleHLS1/movie.m3u8")])),
        )
        .await;

        assert!(matches!(result, Err(PipelineError::Notify(_))));
    }
}
