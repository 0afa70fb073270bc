//! In-process transport for entity events.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

use common::AppResult;

use super::{EntityChanged, EntityEvents};

/// Fans entity events out to in-process subscribers.
#[derive(Clone)]
pub struct LocalEventBus {
    sender: broadcast::Sender<EntityChanged>,
}

impl LocalEventBus {
    /// Create a bus buffering up to `capacity` events per lagging subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Receive every event emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<EntityChanged> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl EntityEvents for LocalEventBus {
    async fn entity_changed(&self, event: &EntityChanged) -> AppResult<()> {
        match self.sender.send(event.clone()) {
            Ok(receivers) => debug!(event = %event.event_name(), receivers, "Emitted entity event"),
            // No subscribers is not a delivery failure
            Err(_) => debug!(event = %event.event_name(), "Entity event has no subscribers"),
        }
        Ok(())
    }
}
