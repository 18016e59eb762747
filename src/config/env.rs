use std::collections::HashMap;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvKey {
    ServerPort,
    MediaConvertEndpoint,
    MediaConvertRole,
    DestinationBucket,
    SourceBucket,
    CloudFrontDomain,
    StackName,
    SnsTopicArn,
    Region,
    LogGroupName,
    RabbitMqUrl,
    SubmitQueue,
    CompleteQueue,
    QueuePrefetch,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::MediaConvertEndpoint => "MEDIACONVERT_ENDPOINT",
            EnvKey::MediaConvertRole => "MEDIACONVERT_ROLE",
            EnvKey::DestinationBucket => "DESTINATION_BUCKET",
            EnvKey::SourceBucket => "SOURCE_BUCKET",
            EnvKey::CloudFrontDomain => "CLOUDFRONT_DOMAIN",
            EnvKey::StackName => "STACKNAME",
            EnvKey::SnsTopicArn => "SNS_TOPIC_ARN",
            EnvKey::Region => "AWS_REGION",
            EnvKey::LogGroupName => "LOG_GROUP_NAME",
            EnvKey::RabbitMqUrl => "RABBITMQ_URL",
            EnvKey::SubmitQueue => "SUBMIT_QUEUE",
            EnvKey::CompleteQueue => "COMPLETE_QUEUE",
            EnvKey::QueuePrefetch => "QUEUE_PREFETCH",
        }
    }
}

/// Reads configuration values by key. The process environment is the
/// production source; tests hand in a map.
pub trait EnvSource {
    fn lookup(&self, key: EnvKey) -> Option<String>;

    /// Blank values count as missing.
    fn get(&self, key: EnvKey) -> Option<String> {
        self.lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn get_or(&self, key: EnvKey, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn get_parsed<T: FromStr>(&self, key: EnvKey, default: T) -> Result<T, String> {
        match self.get(key) {
            Some(val) => val.parse::<T>().map_err(|_| val),
            None => Ok(default),
        }
    }
}

pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, key: EnvKey) -> Option<String> {
        env::var(key.as_str()).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn lookup(&self, key: EnvKey) -> Option<String> {
        HashMap::get(self, key.as_str()).cloned()
    }
}
