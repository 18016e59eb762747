use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::warn;

use super::dto::{JobStateEvent, JobStateOutcome};
use super::service::CompletionService;
use crate::common::events::EventEnvelope;
use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::common::routing::{self, Admission};
use crate::state::AppState;

/// Job state changed
/// Publishes the completion or failure notification for a transcoding job.
#[utoipa::path(
    post,
    path = "/api/v1/events/job-state",
    request_body = EventEnvelope<JobStateEvent>,
    responses(
        (status = 200, description = "Status handled", body = ApiResponse<JobStateOutcome>),
        (status = 202, description = "Event belongs to another stack and was ignored"),
        (status = 500, description = "Processing failed; a processing error notification was attempted")
    ),
    tag = "Events"
)]
pub async fn job_state(
    State(state): State<AppState>,
    Json(envelope): Json<EventEnvelope<JobStateEvent>>,
) -> impl IntoResponse {
    if let Admission::Ignore(reason) = routing::admit_job_state(&state.config, &envelope.detail) {
        warn!("Ignoring job state event: {}", reason);
        return ApiSuccess(ApiResponse::<JobStateOutcome>::ignored(&reason), StatusCode::ACCEPTED)
            .into_response();
    }

    match CompletionService::handle(&state, &envelope).await {
        Ok(outcome) => ApiSuccess(
            ApiResponse::success(outcome, "Job state event processed"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
