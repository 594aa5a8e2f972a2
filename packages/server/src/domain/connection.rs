//! A live relay connection as seen by the rest of the server.
//!
//! The socket itself is owned by the connection's two loops (see
//! `ui::connection_loop`). This handle carries what other tasks need: the
//! current room, the outbound queue, and the lifecycle state.

use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use tokio::sync::{
    mpsc::{self, error::TrySendError},
    watch,
};
use uuid::Uuid;

use super::{error::EnqueueError, event::Event};

/// Receiving half of a connection's outbound queue, drained by its write loop.
pub type OutboundReceiver = mpsc::Receiver<Event>;

/// Unique identifier of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle of a connection.
///
/// Transitions only move forward: `Connecting -> Active -> Closing -> Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConnectionState {
    /// Constructed, not yet registered
    Connecting,
    /// Registered and running both loops
    Active,
    /// Removal requested; both loops are winding down
    Closing,
    /// Both loops have finished
    Closed,
}

#[derive(Debug)]
pub struct Connection {
    id: ConnectionId,
    /// Empty string means no room assigned.
    room: RwLock<String>,
    outbound: mpsc::Sender<Event>,
    state: watch::Sender<ConnectionState>,
}

impl Connection {
    /// Create a connection handle with a bounded outbound queue.
    ///
    /// # Panics
    ///
    /// Panics if `outbound_capacity` is zero.
    pub fn new(outbound_capacity: usize) -> (Arc<Self>, OutboundReceiver) {
        let (outbound, receiver) = mpsc::channel(outbound_capacity);
        let (state, _) = watch::channel(ConnectionState::Connecting);
        let connection = Arc::new(Self {
            id: ConnectionId::generate(),
            room: RwLock::new(String::new()),
            outbound,
            state,
        });
        (connection, receiver)
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn room(&self) -> String {
        self.room
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn in_room(&self, room: &str) -> bool {
        *self.room.read().unwrap_or_else(PoisonError::into_inner) == room
    }

    pub fn set_room(&self, room: impl Into<String>) {
        *self.room.write().unwrap_or_else(PoisonError::into_inner) = room.into();
    }

    /// Queue an event for the write loop without waiting.
    pub fn enqueue(&self, event: Event) -> Result<(), EnqueueError> {
        if self.is_closing() {
            return Err(EnqueueError::Closed);
        }
        self.outbound.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => EnqueueError::Full,
            TrySendError::Closed(_) => EnqueueError::Closed,
        })
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    pub fn is_closing(&self) -> bool {
        self.state() >= ConnectionState::Closing
    }

    /// `Connecting -> Active`. Returns false if the connection was not connecting.
    pub fn activate(&self) -> bool {
        self.transition(|state| state == ConnectionState::Connecting, ConnectionState::Active)
    }

    /// Request shutdown of both loops. Returns true only for the call that
    /// performed the transition.
    pub fn close(&self) -> bool {
        self.transition(|state| state < ConnectionState::Closing, ConnectionState::Closing)
    }

    /// Record that both loops have finished.
    pub fn mark_closed(&self) {
        self.transition(|state| state != ConnectionState::Closed, ConnectionState::Closed);
    }

    /// Resolves once the connection reaches `Closing` (or later).
    pub async fn closing(&self) {
        let mut state = self.state.subscribe();
        let _ = state
            .wait_for(|state| *state >= ConnectionState::Closing)
            .await;
    }

    fn transition(&self, allowed: impl Fn(ConnectionState) -> bool, next: ConnectionState) -> bool {
        self.state.send_if_modified(|state| {
            if allowed(*state) {
                *state = next;
                true
            } else {
                false
            }
        })
    }
}
