//! Queue ingress: one consumer per event queue, one task per delivery.

use std::future::Future;

use futures_util::StreamExt;
use lapin::Consumer;
use lapin::message::Delivery;
use lapin::options::{BasicAckOptions, BasicNackOptions, BasicRejectOptions};
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::common::events::EventEnvelope;
use crate::common::routing::{self, Admission};
use crate::infrastructure::queue::RabbitMqService;
use crate::modules::completion::dto::JobStateEvent;
use crate::modules::completion::service::CompletionService;
use crate::modules::submission::dto::{SubmitOutcome, UploadEvent};
use crate::modules::submission::service::SubmissionService;
use crate::state::AppState;

/// What to tell the broker once a delivery has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Ack,
    /// Handler failed. Not requeued; dead-lettering is up to the broker.
    Nack,
}

pub async fn start_event_consumers(state: AppState, queue: RabbitMqService) -> anyhow::Result<()> {
    let uploads = queue
        .consume(&state.config.submit_queue, "vod_job_submit")
        .await?;
    let job_states = queue
        .consume(&state.config.complete_queue, "vod_job_complete")
        .await?;

    info!(
        "🎥 Event consumers listening on '{}' and '{}'",
        state.config.submit_queue, state.config.complete_queue
    );

    tokio::spawn(run_consumer(state.clone(), uploads, on_upload));
    tokio::spawn(run_consumer(state, job_states, on_job_state));

    Ok(())
}

async fn run_consumer<D, F, Fut>(state: AppState, mut consumer: Consumer, handler: F)
where
    D: DeserializeOwned + Send + 'static,
    F: Fn(AppState, EventEnvelope<D>) -> Fut + Copy + Send + 'static,
    Fut: Future<Output = Disposition> + Send + 'static,
{
    while let Some(delivery) = consumer.next().await {
        let delivery = match delivery {
            Ok(delivery) => delivery,
            Err(e) => {
                error!("❌ Consumer error: {}", e);
                continue;
            }
        };

        let state = state.clone();
        tokio::spawn(async move {
            let envelope = match serde_json::from_slice::<EventEnvelope<D>>(&delivery.data) {
                Ok(envelope) => envelope,
                Err(e) => {
                    error!("❌ Failed to parse event: {}", e);
                    if let Err(e) = delivery
                        .reject(BasicRejectOptions { requeue: false })
                        .await
                    {
                        error!("Failed to reject message: {}", e);
                    }
                    return;
                }
            };

            let disposition = handler(state, envelope).await;
            settle(&delivery, disposition).await;
        });
    }

    warn!("Event consumer stream ended");
}

async fn settle(delivery: &Delivery, disposition: Disposition) {
    let result = match disposition {
        Disposition::Ack => delivery.ack(BasicAckOptions::default()).await,
        Disposition::Nack => {
            delivery
                .nack(BasicNackOptions {
                    requeue: false,
                    ..BasicNackOptions::default()
                })
                .await
        }
    };

    if let Err(e) = result {
        error!("Failed to settle message ({:?}): {}", disposition, e);
    }
}

pub async fn on_upload(state: AppState, envelope: EventEnvelope<UploadEvent>) -> Disposition {
    if let Admission::Ignore(reason) = routing::admit_upload(&state.config, &envelope.detail) {
        info!("Ignoring upload event: {}", reason);
        return Disposition::Ack;
    }

    match SubmissionService::handle(&state, &envelope.detail).await {
        Ok(SubmitOutcome::Submitted { job_id, .. }) => {
            info!("📦 Upload {} submitted as job {}", envelope.detail.key, job_id);
            Disposition::Ack
        }
        Ok(SubmitOutcome::Reported { .. }) => Disposition::Ack,
        Err(e) => {
            error!("❌ Could not report submission failure: {}", e);
            Disposition::Nack
        }
    }
}

pub async fn on_job_state(state: AppState, envelope: EventEnvelope<JobStateEvent>) -> Disposition {
    if let Admission::Ignore(reason) = routing::admit_job_state(&state.config, &envelope.detail) {
        warn!("Ignoring job state event: {}", reason);
        return Disposition::Ack;
    }

    match CompletionService::handle(&state, &envelope).await {
        Ok(_) => Disposition::Ack,
        Err(e) => {
            error!("❌ Job state event for {} failed: {}", envelope.detail.job_id, e);
            Disposition::Nack
        }
    }
}
