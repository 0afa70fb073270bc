//! Entity change notifications.
//!
//! The registration pipeline announces every persisted user through the
//! [`EntityEvents`] port. Two transports are provided:
//! - [`RedisEventBus`] publishes JSON on a Redis channel per event name
//! - [`LocalEventBus`] fans out in-process over a broadcast channel

mod local_bus;
mod redis_bus;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use common::AppResult;
use domain::PublicUser;

pub use local_bus::LocalEventBus;
pub use redis_bus::RedisEventBus;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service name used as the event namespace
pub const SERVICE_NAME: &str = "users";

/// Kind of change applied to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityChange {
    Created,
}

impl EntityChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityChange::Created => "created",
        }
    }
}

/// Event emitted after an entity change is committed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityChanged {
    pub kind: EntityChange,
    pub entity: PublicUser,
}

impl EntityChanged {
    pub fn created(entity: PublicUser) -> Self {
        Self {
            kind: EntityChange::Created,
            entity,
        }
    }

    /// Event name, e.g. `users.entity.created`
    pub fn event_name(&self) -> String {
        format!("{}.entity.{}", SERVICE_NAME, self.kind.as_str())
    }
}

/// Notification port for entity changes.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EntityEvents: Send + Sync {
    /// Deliver the event to the transport
    async fn entity_changed(&self, event: &EntityChanged) -> AppResult<()>;
}
