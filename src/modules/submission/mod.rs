use axum::Router;
use axum::routing::post;

use crate::state::AppState;

pub mod decode;
pub mod dto;
pub mod handler;
pub mod ladder;
pub mod request;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new().route("/object-created", post(handler::object_created))
}
