// src/handlers/events.rs
use futures::{SinkExt, StreamExt};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use warp::ws::{Message, WebSocket};

use crate::services::market::MarketService;

/// Forwards each broadcast update to one websocket client as an
/// `{"action": ...}` text frame. Closes quietly when either side goes away.
pub async fn client_connected(socket: WebSocket, svc: Arc<MarketService>) {
    info!("Update subscriber connected");

    let (mut tx, mut rx) = socket.split();
    let mut updates = svc.subscribe();

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(action) => {
                    let frame = serde_json::json!({ "action": action }).to_string();
                    if tx.send(Message::text(frame)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Update subscriber lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            incoming = rx.next() => match incoming {
                Some(Ok(msg)) if msg.is_close() => break,
                // Inbound frames carry nothing we act on
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!("Update subscriber socket error: {}", e);
                    break;
                }
                None => break,
            },
        }
    }

    info!("Update subscriber disconnected");
}
