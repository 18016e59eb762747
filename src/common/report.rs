//! Notification messages and the report-then-reraise boundary.

use std::future::Future;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::common::error::{ErrorPayload, PipelineError, PipelineResult};
use crate::infrastructure::notification::{NotificationChannel, NotifyError};

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub subject: String,
    pub body: serde_json::Value,
}

impl Notification {
    pub fn new(subject: impl Into<String>, body: &impl Serialize) -> Result<Self, NotifyError> {
        Ok(Self {
            subject: subject.into(),
            body: serde_json::to_value(body)?,
        })
    }

    pub async fn send(
        &self,
        channel: &dyn NotificationChannel,
        destination: &str,
    ) -> Result<(), NotifyError> {
        info!("Sending notification: {}", self.subject);
        channel.publish(destination, &self.subject, &self.body).await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ProcessingErrorBody<'a> {
    job_id: Option<&'a str>,
    error: ErrorPayload,
}

/// Wraps a unit of work so that any error leaving it is reported on the
/// notification channel before being handed back to the caller.
pub struct ErrorReporter<'a> {
    channel: &'a dyn NotificationChannel,
    destination: &'a str,
    stack_name: &'a str,
}

impl<'a> ErrorReporter<'a> {
    pub fn new(
        channel: &'a dyn NotificationChannel,
        destination: &'a str,
        stack_name: &'a str,
    ) -> Self {
        Self {
            channel,
            destination,
            stack_name,
        }
    }

    pub async fn guard<T, F>(&self, job_id: Option<&str>, work: F) -> PipelineResult<T>
    where
        F: Future<Output = PipelineResult<T>>,
    {
        match work.await {
            Ok(value) => Ok(value),
            Err(err) => {
                error!("❌ Processing failed for job {:?}: {}", job_id, err);
                self.report(job_id, &err).await;
                Err(err)
            }
        }
    }

    /// Best effort: a failure here is logged and does not replace the
    /// original error.
    async fn report(&self, job_id: Option<&str>, err: &PipelineError) {
        let job_id = job_id.filter(|id| !id.is_empty());
        let subject = format!(
            "{}: Job PROCESSING ERROR id:{}",
            self.stack_name,
            job_id.unwrap_or("unknown")
        );
        let body = ProcessingErrorBody {
            job_id,
            error: ErrorPayload::from(err),
        };

        let sent = match Notification::new(subject, &body) {
            Ok(notification) => notification.send(self.channel, self.destination).await,
            Err(e) => Err(e),
        };

        if let Err(notify_err) = sent {
            warn!(
                "Failed to report processing error ({}) for job {:?}: {}",
                err, job_id, notify_err
            );
        }
    }
}
