use axum::Router;
use axum::routing::post;

use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod playback;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new().route("/job-state", post(handler::job_state))
}
