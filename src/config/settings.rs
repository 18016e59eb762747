use thiserror::Error;
use url::Url;

use crate::config::env::{EnvKey, EnvSource, ProcessEnv};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment value: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    pub mediaconvert_endpoint: String,
    pub mediaconvert_role: String,
    pub destination_bucket: String,
    pub source_bucket: Option<String>,
    pub cloudfront_domain: String,
    pub stack_name: String,
    pub sns_topic_arn: String,
    pub region: String,
    pub log_group_name: String,
    pub rabbitmq_url: Option<String>,
    pub submit_queue: String,
    pub complete_queue: String,
    /// Unacked deliveries the broker may push per channel.
    pub queue_prefetch: u16,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_lookup(&ProcessEnv)
    }

    pub fn from_lookup(source: &impl EnvSource) -> Result<Self, ConfigError> {
        let required = |key: EnvKey| source.get(key).ok_or(ConfigError::Missing(key.as_str()));

        let mediaconvert_endpoint = required(EnvKey::MediaConvertEndpoint)?;
        Url::parse(&mediaconvert_endpoint).map_err(|_| ConfigError::Invalid {
            key: EnvKey::MediaConvertEndpoint.as_str(),
            value: mediaconvert_endpoint.clone(),
        })?;

        let server_port = source
            .get_parsed(EnvKey::ServerPort, 3000u16)
            .map_err(|value| ConfigError::Invalid {
                key: EnvKey::ServerPort.as_str(),
                value,
            })?;

        // Zero means unlimited to the broker.
        let queue_prefetch = source
            .get_parsed(EnvKey::QueuePrefetch, 16u16)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ConfigError::Invalid {
                key: EnvKey::QueuePrefetch.as_str(),
                value: source.get_or(EnvKey::QueuePrefetch, ""),
            })?;

        let stack_name = required(EnvKey::StackName)?;
        let log_group_name =
            source.get_or(EnvKey::LogGroupName, &format!("/vod-pipeline/{}", stack_name));

        Ok(Self {
            server_port,
            mediaconvert_endpoint,
            mediaconvert_role: required(EnvKey::MediaConvertRole)?,
            destination_bucket: required(EnvKey::DestinationBucket)?,
            source_bucket: source.get(EnvKey::SourceBucket),
            cloudfront_domain: required(EnvKey::CloudFrontDomain)?,
            stack_name,
            sns_topic_arn: required(EnvKey::SnsTopicArn)?,
            region: required(EnvKey::Region)?,
            log_group_name,
            rabbitmq_url: source.get(EnvKey::RabbitMqUrl),
            submit_queue: source.get_or(EnvKey::SubmitQueue, "vod.object_created"),
            complete_queue: source.get_or(EnvKey::CompleteQueue, "vod.job_state"),
            queue_prefetch,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    pub(crate) fn base_env() -> HashMap<String, String> {
        [
            ("MEDIACONVERT_ENDPOINT", "https://abcd1234.mediaconvert.us-east-1.amazonaws.com"),
            ("MEDIACONVERT_ROLE", "arn:aws:iam::123456789012:role/MediaConvertRole"),
            ("DESTINATION_BUCKET", "dest"),
            ("CLOUDFRONT_DOMAIN", "cdn.example.com"),
            ("STACKNAME", "VodStack"),
            ("SNS_TOPIC_ARN", "arn:aws:sns:us-east-1:123456789012:VodStack-Topic"),
            ("AWS_REGION", "us-east-1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    pub(crate) fn test_config() -> AppConfig {
        AppConfig::from_lookup(&base_env()).expect("base env is complete")
    }

    #[test]
    fn loads_required_values_and_defaults() {
        let config = test_config();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.log_group_name, "/vod-pipeline/VodStack");
        assert_eq!(config.submit_queue, "vod.object_created");
        assert_eq!(config.complete_queue, "vod.job_state");
        assert_eq!(config.queue_prefetch, 16);
        assert!(config.source_bucket.is_none());
        assert!(config.rabbitmq_url.is_none());
    }

    #[test]
    fn missing_required_value_names_the_key() {
        let mut env = base_env();
        env.remove("SNS_TOPIC_ARN");

        let err = AppConfig::from_lookup(&env).unwrap_err();
        assert_eq!(err, ConfigError::Missing("SNS_TOPIC_ARN"));
    }

    #[test]
    fn blank_required_value_is_missing() {
        let mut env = base_env();
        env.insert("CLOUDFRONT_DOMAIN".to_string(), "   ".to_string());

        let err = AppConfig::from_lookup(&env).unwrap_err();
        assert_eq!(err, ConfigError::Missing("CLOUDFRONT_DOMAIN"));
    }

    #[test]
    fn rejects_unparsable_endpoint_and_port() {
        let mut env = base_env();
        env.insert("MEDIACONVERT_ENDPOINT".to_string(), "not a url".to_string());
        assert!(matches!(
            AppConfig::from_lookup(&env),
            Err(ConfigError::Invalid { key: "MEDIACONVERT_ENDPOINT", .. })
        ));

        let mut env = base_env();
        env.insert("APP_PORT".to_string(), "eighty".to_string());
        assert!(matches!(
            AppConfig::from_lookup(&env),
            Err(ConfigError::Invalid { key: "APP_PORT", .. })
        ));
    }

    #[test]
    fn optional_values_override_defaults() {
        let mut env = base_env();
        env.insert("SOURCE_BUCKET".to_string(), "uploads".to_string());
        env.insert("LOG_GROUP_NAME".to_string(), "/aws/lambda/jobSubmit".to_string());
        env.insert("RABBITMQ_URL".to_string(), "amqp://localhost:5672".to_string());
        env.insert("APP_PORT".to_string(), "8080".to_string());

        let config = AppConfig::from_lookup(&env).unwrap();
        assert_eq!(config.source_bucket.as_deref(), Some("uploads"));
        assert_eq!(config.log_group_name, "/aws/lambda/jobSubmit");
        assert_eq!(config.rabbitmq_url.as_deref(), Some("amqp://localhost:5672"));
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn queue_prefetch_is_bounded() {
        let mut env = base_env();
        env.insert("QUEUE_PREFETCH".to_string(), "4".to_string());
        assert_eq!(AppConfig::from_lookup(&env).unwrap().queue_prefetch, 4);

        for bad in ["0", "-1", "lots"] {
            env.insert("QUEUE_PREFETCH".to_string(), bad.to_string());
            assert!(matches!(
                AppConfig::from_lookup(&env),
                Err(ConfigError::Invalid { key: "QUEUE_PREFETCH", .. })
            ));
        }
    }
}
