//! The two loops that drive one connection.
//!
//! `read_loop` owns the receiving half of the socket and dispatches events;
//! `write_loop` owns the sending half and is the only code that writes to it.
//! Whichever finishes first removes the connection from the registry, which
//! moves it to `Closing` and makes the other loop exit.

use std::{sync::Arc, time::Duration};

use axum::{
    body::Bytes,
    extract::ws::{Message, WebSocket},
};
use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use tokio::time::{Instant, interval_at, sleep};

use crate::{
    domain::{Connection, ConnectionId, Event, OutboundReceiver},
    usecase::EventRouter,
};

use super::error::ConnectionError;

/// Read frames until the peer closes, the transport fails, the heartbeat
/// deadline passes, or the connection starts closing.
///
/// Only a heartbeat reply (Pong) pushes the deadline forward.
pub async fn read_loop(
    mut receiver: SplitStream<WebSocket>,
    connection: Arc<Connection>,
    router: Arc<EventRouter>,
    pong_wait: Duration,
) -> Result<(), ConnectionError> {
    let closing = connection.closing();
    tokio::pin!(closing);
    let deadline = sleep(pong_wait);
    tokio::pin!(deadline);

    loop {
        let message = tokio::select! {
            _ = &mut closing => return Ok(()),
            _ = &mut deadline => return Err(ConnectionError::HeartbeatTimeout(pong_wait)),
            message = receiver.next() => message,
        };

        let Some(message) = message else {
            return Ok(());
        };

        match message? {
            Message::Text(text) => {
                let event = Event::from_json(text.as_str()).map_err(ConnectionError::Decode)?;
                dispatch(&router, &event, &connection).await;
            }
            Message::Binary(data) => {
                let event = Event::from_slice(&data).map_err(ConnectionError::Decode)?;
                dispatch(&router, &event, &connection).await;
            }
            Message::Pong(_) => {
                tracing::trace!("pong from {}", connection.id());
                deadline.as_mut().reset(Instant::now() + pong_wait);
            }
            // answered by the protocol layer
            Message::Ping(_) => {}
            Message::Close(frame) => {
                tracing::debug!("Connection {} sent close: {:?}", connection.id(), frame);
                return Ok(());
            }
        }
    }
}

/// Route one event. Handler failures only drop the message.
async fn dispatch(router: &EventRouter, event: &Event, connection: &Connection) {
    tracing::debug!(
        "Connection {} sent '{}' event",
        connection.id(),
        event.event_type
    );
    if let Err(e) = router.route(event, connection).await {
        tracing::warn!("Error handling message from {}: {}", connection.id(), e);
    }
}

/// Drain the outbound queue and send heartbeat probes until a write fails or
/// the connection starts closing, in which case a Close frame is sent.
pub async fn write_loop(
    mut sender: SplitSink<WebSocket, Message>,
    mut outbound: OutboundReceiver,
    connection: Arc<Connection>,
    ping_interval: Duration,
) -> Result<(), ConnectionError> {
    let closing = connection.closing();
    tokio::pin!(closing);
    let mut ticker = interval_at(Instant::now() + ping_interval, ping_interval);

    loop {
        tokio::select! {
            biased;
            _ = &mut closing => {
                send_close(&mut sender, connection.id()).await;
                return Ok(());
            }
            event = outbound.recv() => {
                let Some(event) = event else {
                    send_close(&mut sender, connection.id()).await;
                    return Ok(());
                };
                let json = event.to_json().map_err(ConnectionError::Serialize)?;
                sender.send(Message::Text(json.into())).await?;
            }
            _ = ticker.tick() => {
                tracing::trace!("ping to {}", connection.id());
                sender.send(Message::Ping(Bytes::new())).await?;
            }
        }
    }
}

async fn send_close(sender: &mut SplitSink<WebSocket, Message>, id: ConnectionId) {
    if let Err(e) = sender.send(Message::Close(None)).await {
        tracing::debug!("Connection {} already gone when closing: {}", id, e);
    }
}

/// Log why a loop ended, at a level matching how unusual it is.
pub fn log_loop_exit(direction: &str, id: ConnectionId, result: &Result<(), ConnectionError>) {
    match result {
        Ok(()) => tracing::debug!("{} loop of connection {} finished", direction, id),
        Err(e @ ConnectionError::HeartbeatTimeout(_)) => {
            tracing::info!("{} loop of connection {} stopped: {}", direction, id, e)
        }
        Err(e) => tracing::warn!("{} loop of connection {} failed: {}", direction, id, e),
    }
}
