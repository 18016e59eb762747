use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::infrastructure::mediaconvert::TranscodingEngine;
use crate::infrastructure::notification::NotificationChannel;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub engine: Arc<dyn TranscodingEngine>,
    pub notifier: Arc<dyn NotificationChannel>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        engine: Arc<dyn TranscodingEngine>,
        notifier: Arc<dyn NotificationChannel>,
    ) -> Self {
        Self {
            config,
            engine,
            notifier,
        }
    }
}
