use anyhow::{Result, anyhow};
use lapin::{
    Channel, Connection, ConnectionProperties, Consumer, options::*, types::FieldTable,
};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct RabbitMqService {
    _conn: Arc<Connection>,
    channel: Channel,
}

impl RabbitMqService {
    /// `prefetch` caps unacked deliveries on the channel, which bounds how
    /// many events are in flight at once.
    pub async fn new(url: &str, prefetch: u16) -> Result<Self> {
        info!("Connecting to RabbitMQ");
        let conn = Connection::connect(url, ConnectionProperties::default())
            .await
            .map_err(|e| anyhow!("Failed to connect to RabbitMQ: {}", e))?;

        let channel = conn
            .create_channel()
            .await
            .map_err(|e| anyhow!("Failed to create channel: {}", e))?;

        channel
            .basic_qos(prefetch, BasicQosOptions::default())
            .await
            .map_err(|e| anyhow!("Failed to set prefetch: {}", e))?;

        info!("Connected to RabbitMQ (prefetch {})", prefetch);
        Ok(Self {
            _conn: Arc::new(conn),
            channel,
        })
    }

    /// Declares `queue` as durable and starts a consumer on it.
    pub async fn consume(&self, queue: &str, consumer_tag: &str) -> Result<Consumer> {
        self.channel
            .queue_declare(
                queue,
                QueueDeclareOptions {
                    durable: true,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| anyhow!("Failed to declare queue {}: {}", queue, e))?;

        self.channel
            .basic_consume(
                queue,
                consumer_tag,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(|e| anyhow!("Failed to consume {}: {}", queue, e))
    }
}
