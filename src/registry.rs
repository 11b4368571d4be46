// Live-update channel registry shared by the send and websocket handlers

use std::collections::HashMap;

use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

use crate::models::LiveMessage;

/// Identifier handed out when a channel is registered.
pub type ChannelId = Uuid;

/// The set of live websocket channels. Senders are plain unbounded mpsc
/// handles, so pushing to them never blocks and the map lock is never held
/// across I/O. Channels whose receiving task has gone away are swept out
/// at the end of the next broadcast.
#[derive(Default)]
pub struct Registry {
    channels: Mutex<HashMap<ChannelId, mpsc::UnboundedSender<warp::ws::Message>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a channel and return its identifier.
    pub async fn register(&self, sender: mpsc::UnboundedSender<warp::ws::Message>) -> ChannelId {
        let id = Uuid::new_v4();
        self.channels.lock().await.insert(id, sender);
        tracing::debug!(channel = %id, "registered live channel");
        id
    }

    /// Remove a channel. Removing an id that is already gone is a no-op.
    pub async fn unregister(&self, id: ChannelId) {
        self.channels.lock().await.remove(&id);
        tracing::debug!(channel = %id, "unregistered live channel");
    }

    /// Push one payload to every registered channel and return how many
    /// accepted it. Channels that refuse delivery are collected during the
    /// walk and removed after it completes.
    pub async fn broadcast(&self, payload: &LiveMessage) -> usize {
        let text = match serde_json::to_string(payload) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "failed to encode live message");
                return 0;
            }
        };

        let mut channels = self.channels.lock().await;
        let mut delivered = 0;
        let mut stale = Vec::new();

        for (id, sender) in channels.iter() {
            if sender.send(warp::ws::Message::text(text.clone())).is_ok() {
                delivered += 1;
            } else {
                stale.push(*id);
            }
        }

        for id in &stale {
            channels.remove(id);
        }
        if !stale.is_empty() {
            tracing::debug!(count = stale.len(), "swept closed live channels");
        }

        delivered
    }

    /// Number of currently registered channels.
    pub async fn len(&self) -> usize {
        self.channels.lock().await.len()
    }
}
