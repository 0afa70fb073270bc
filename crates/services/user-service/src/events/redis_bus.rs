//! Redis pub/sub transport for entity events.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisError};
use tracing::debug;

use common::{AppError, AppResult};

use super::{EntityChanged, EntityEvents};

/// Publishes entity events on Redis, one channel per event name.
pub struct RedisEventBus {
    conn: ConnectionManager,
}

impl RedisEventBus {
    /// Connect to Redis.
    pub async fn connect(url: &str) -> Result<Self, RedisError> {
        debug!("Connecting event bus to Redis at {}", url);
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl EntityEvents for RedisEventBus {
    async fn entity_changed(&self, event: &EntityChanged) -> AppResult<()> {
        let channel = event.event_name();
        let payload = serde_json::to_string(event)
            .map_err(|e| AppError::internal(format!("Serialization error: {}", e)))?;

        let mut conn = self.conn.clone();
        let receivers: i64 = conn.publish(&channel, payload).await?;

        debug!(channel = %channel, receivers, "Published entity event");
        Ok(())
    }
}
