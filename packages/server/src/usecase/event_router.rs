//! Routing of inbound events to handlers by their type tag.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use relay_shared::time::Clock;

use crate::{
    domain::{Connection, EVENT_CHANGE_ROOM, EVENT_SEND_MESSAGE, Event, EventError},
    infrastructure::ConnectionRegistry,
};

use super::{change_room::ChangeRoomHandler, send_message::SendMessageHandler};

/// Handler for one event type.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &Event, connection: &Connection) -> Result<(), EventError>;
}

#[derive(Default)]
pub struct EventRouter {
    handlers: HashMap<String, Arc<dyn EventHandler>>,
}

impl EventRouter {
    /// Router with no handlers registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Router with the `change_room` and `send_message` handlers.
    pub fn with_default_handlers(registry: Arc<ConnectionRegistry>, clock: Arc<dyn Clock>) -> Self {
        let mut router = Self::new();
        router.register(EVENT_CHANGE_ROOM, Arc::new(ChangeRoomHandler));
        router.register(
            EVENT_SEND_MESSAGE,
            Arc::new(SendMessageHandler::new(registry, clock)),
        );
        router
    }

    /// Associate `handler` with `event_type`, replacing any earlier handler.
    pub fn register(
        &mut self,
        event_type: impl Into<String>,
        handler: Arc<dyn EventHandler>,
    ) -> Option<Arc<dyn EventHandler>> {
        self.handlers.insert(event_type.into(), handler)
    }

    pub fn handles(&self, event_type: &str) -> bool {
        self.handlers.contains_key(event_type)
    }

    pub async fn route(&self, event: &Event, connection: &Connection) -> Result<(), EventError> {
        let handler = self
            .handlers
            .get(&event.event_type)
            .ok_or_else(|| EventError::UnknownEventType(event.event_type.clone()))?;
        handler.handle(event, connection).await
    }
}
