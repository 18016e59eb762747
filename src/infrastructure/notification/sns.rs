use async_trait::async_trait;
use aws_sdk_sns::Client;
use aws_sdk_sns::error::DisplayErrorContext;
use tracing::{debug, error};

use super::{NotificationChannel, NotifyError};

/// SNS rejects subjects longer than this.
const MAX_SUBJECT_CHARS: usize = 100;

#[derive(Clone)]
pub struct SnsService {
    client: Client,
}

impl SnsService {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl NotificationChannel for SnsService {
    async fn publish(
        &self,
        destination: &str,
        subject: &str,
        body: &serde_json::Value,
    ) -> Result<(), NotifyError> {
        let message = serde_json::to_string_pretty(body)?;

        self.client
            .publish()
            .target_arn(destination)
            .subject(truncate_subject(subject))
            .message(message)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                error!("SNS publish to {} failed: {}", destination, message);
                NotifyError::Publish(message)
            })?;

        debug!("Published notification: {}", subject);
        Ok(())
    }
}

fn truncate_subject(subject: &str) -> &str {
    match subject.char_indices().nth(MAX_SUBJECT_CHARS) {
        Some((idx, _)) => &subject[..idx],
        None => subject,
    }
}
