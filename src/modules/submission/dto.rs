use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// "Object created" detail for a newly uploaded source video.
///
/// Every field is lenient so that a malformed detail still reaches the
/// submission handler and is reported there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadEvent {
    /// Percent-encoded object key, `+` standing for a space.
    #[serde(default)]
    pub key: String,
    /// Object size as sent by the event source. Informational only.
    #[serde(default, deserialize_with = "opaque_size")]
    #[schema(example = "1048576")]
    pub size: String,
    #[serde(default)]
    pub bucket_name: String,
}

impl UploadEvent {
    /// Object size in bytes, when the event carried a usable one.
    pub fn size_bytes(&self) -> Option<u64> {
        self.size.trim().parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Submitted { guid: String, job_id: String },
    /// Submission failed and the failure notification went out.
    Reported { error: String },
}

fn opaque_size<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
