use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use super::dto::{SubmitOutcome, UploadEvent};
use super::service::SubmissionService;
use crate::common::events::EventEnvelope;
use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::common::routing::{self, Admission};
use crate::state::AppState;

/// Object created
/// Builds and submits a transcoding job for an uploaded source video.
#[utoipa::path(
    post,
    path = "/api/v1/events/object-created",
    request_body = EventEnvelope<UploadEvent>,
    responses(
        (status = 202, description = "Job submitted, submission failure reported, or event ignored", body = ApiResponse<SubmitOutcome>),
        (status = 500, description = "Failure notification could not be sent")
    ),
    tag = "Events"
)]
pub async fn object_created(
    State(state): State<AppState>,
    Json(envelope): Json<EventEnvelope<UploadEvent>>,
) -> impl IntoResponse {
    if let Admission::Ignore(reason) = routing::admit_upload(&state.config, &envelope.detail) {
        info!("Ignoring upload event: {}", reason);
        return ApiSuccess(ApiResponse::<SubmitOutcome>::ignored(&reason), StatusCode::ACCEPTED)
            .into_response();
    }

    match SubmissionService::handle(&state, &envelope.detail).await {
        Ok(outcome) => ApiSuccess(
            ApiResponse::success(outcome, "Upload event processed"),
            StatusCode::ACCEPTED,
        )
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
