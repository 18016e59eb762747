use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Routing envelope around an event detail, as delivered by the event bus.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventEnvelope<D> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(rename = "detail-type", default, skip_serializing_if = "Option::is_none")]
    pub detail_type: Option<String>,
    pub detail: D,
}

impl<D> EventEnvelope<D> {
    pub fn new(detail: D) -> Self {
        Self {
            id: None,
            account: None,
            time: None,
            region: None,
            detail_type: None,
            detail,
        }
    }
}
