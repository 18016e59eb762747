use async_trait::async_trait;
use thiserror::Error;

pub mod sns;

pub use sns::SnsService;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to publish notification: {0}")]
    Publish(String),

    #[error("Failed to serialize notification body: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn publish(
        &self,
        destination: &str,
        subject: &str,
        body: &serde_json::Value,
    ) -> Result<(), NotifyError>;
}
