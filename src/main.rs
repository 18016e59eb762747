use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::settings::AppConfig;
use crate::infrastructure::mediaconvert::MediaConvertService;
use crate::infrastructure::notification::SnsService;
use crate::infrastructure::queue::RabbitMqService;
use crate::state::AppState;

mod app;
mod common;
mod config;
mod docs;
mod infrastructure;
mod modules;
mod routes;
mod state;
mod workers;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vod_pipeline=info,tower_http=info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Starting VOD pipeline...");

    let config = match AppConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .load()
        .await;

    let engine = MediaConvertService::new(&sdk_config, &config.mediaconvert_endpoint);
    let notifier = SnsService::new(&sdk_config);
    let state = AppState::new(config.clone(), Arc::new(engine), Arc::new(notifier));

    match &config.rabbitmq_url {
        Some(url) => {
            let queue = RabbitMqService::new(url, config.queue_prefetch).await?;
            workers::event_consumer::start_event_consumers(state.clone(), queue).await?;
        }
        None => warn!("RABBITMQ_URL not set, queue ingress disabled"),
    }

    let app = app::create_app(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
