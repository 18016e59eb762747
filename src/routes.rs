use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use crate::docs::ApiDoc;
use axum::Router;
use crate::state::AppState;

use tower_http::cors::{Any, CorsLayer};

pub fn configure_routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/v1", api_routes())
        .nest("/api/v1/events", event_routes())
        .layer(cors)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", axum::routing::get(|| async { "ok" }))
}

fn event_routes() -> Router<AppState> {
    crate::modules::submission::router().merge(crate::modules::completion::router())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::app::create_app;
    use crate::config::settings::tests::test_config;
    use crate::infrastructure::mediaconvert::{EngineError, MockTranscodingEngine};
    use crate::infrastructure::notification::MockNotificationChannel;
    use crate::state::AppState;

    fn app(engine: MockTranscodingEngine, notifier: MockNotificationChannel) -> axum::Router {
        create_app(AppState::new(test_config(), Arc::new(engine), Arc::new(notifier)))
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let response = app(MockTranscodingEngine::new(), MockNotificationChannel::new())
            .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unsupported_upload_is_ignored() {
        let mut engine = MockTranscodingEngine::new();
        engine.expect_create_job().times(0);

        let response = app(engine, MockNotificationChannel::new())
            .oneshot(post(
                "/api/v1/events/object-created",
                json!({ "detail": { "key": "notes.txt", "size": 4, "bucketName": "vod-source" } }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(json_body(response).await["status"], "ignored");
    }

    #[tokio::test]
    async fn upload_is_submitted() {
        let mut engine = MockTranscodingEngine::new();
        engine
            .expect_create_job()
            .times(1)
            .returning(|_| Ok("1700000000000-abc123".to_string()));

        let response = app(engine, MockNotificationChannel::new())
            .oneshot(post(
                "/api/v1/events/object-created",
                json!({
                    "detail-type": "Object Created",
                    "detail": { "key": "movie.MP4", "size": "2048", "bucketName": "vod-source" }
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let body = json_body(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["status"], "submitted");
        assert_eq!(body["data"]["job_id"], "1700000000000-abc123");
    }

    #[tokio::test]
    async fn upload_with_blank_size_is_still_submitted() {
        let mut engine = MockTranscodingEngine::new();
        engine
            .expect_create_job()
            .withf(|request| request.inputs[0].file_input == "s3://b/a.mp4")
            .times(1)
            .returning(|_| Ok("1700000000000-abc123".to_string()));

        let response = app(engine, MockNotificationChannel::new())
            .oneshot(post(
                "/api/v1/events/object-created",
                json!({ "detail": { "key": "a.mp4", "size": "", "bucketName": "b" } }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(json_body(response).await["data"]["status"], "submitted");
    }

    #[tokio::test]
    async fn upload_without_bucket_is_reported() {
        let mut engine = MockTranscodingEngine::new();
        engine
            .expect_create_job()
            .returning(|_| Err(EngineError::CreateJob("invalid input".to_string())));
        let mut notifier = MockNotificationChannel::new();
        notifier
            .expect_publish()
            .withf(|_, subject, _| subject == "VodStack: Encoding Job Submit Failed")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let response = app(engine, notifier)
            .oneshot(post(
                "/api/v1/events/object-created",
                json!({ "detail": { "key": "a.mp4" } }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(json_body(response).await["data"]["status"], "reported");
    }

    #[tokio::test]
    async fn unknown_job_status_answers_500() {
        let mut notifier = MockNotificationChannel::new();
        notifier.expect_publish().times(1).returning(|_, _, _| Ok(()));

        let response = app(MockTranscodingEngine::new(), notifier)
            .oneshot(post(
                "/api/v1/events/job-state",
                json!({
                    "detail": {
                        "status": "PAUSED",
                        "jobId": "j1",
                        "userMetadata": { "stackName": "VodStack" }
                    }
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["message"], "Unknown job status: PAUSED");
    }

    #[tokio::test]
    async fn job_state_from_another_stack_is_ignored() {
        let mut notifier = MockNotificationChannel::new();
        notifier.expect_publish().times(0);

        let response = app(MockTranscodingEngine::new(), notifier)
            .oneshot(post(
                "/api/v1/events/job-state",
                json!({
                    "detail": {
                        "status": "COMPLETE",
                        "jobId": "j1",
                        "userMetadata": { "stackName": "OtherStack" }
                    }
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn input_information_answers_200() {
        let response = app(MockTranscodingEngine::new(), MockNotificationChannel::new())
            .oneshot(post(
                "/api/v1/events/job-state",
                json!({
                    "detail": {
                        "status": "INPUT_INFORMATION",
                        "jobId": "j1",
                        "userMetadata": { "stackName": "VodStack" }
                    }
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["data"]["status"], "acknowledged");
    }
}
