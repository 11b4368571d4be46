// GET /ws handler

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use warp::ws::{WebSocket, Ws};

use crate::registry::Registry;

pub fn ws_handler(ws: Ws, registry: Arc<Registry>) -> impl warp::Reply {
    ws.on_upgrade(move |socket| client_connected(socket, registry))
}

/// Drive one live channel. A writer task owns the socket's sink and forwards
/// whatever broadcasts push into the channel; this task stays on the reading
/// half until the client goes away, then cleans up its registration.
async fn client_connected(socket: WebSocket, registry: Arc<Registry>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    // Writer task: forwards broadcast messages to the websocket sink
    tokio::spawn(async move {
        let mut rx = UnboundedReceiverStream::new(rx);
        while let Some(msg) = rx.next().await {
            if ws_sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let id = registry.register(tx).await;
    tracing::info!(channel = %id, "live channel connected");

    // Inbound frames carry no meaning on this endpoint; drain them until
    // the client closes or the connection errors out.
    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(msg) => {
                if msg.is_close() {
                    break;
                }
            }
            Err(e) => {
                tracing::debug!(channel = %id, error = %e, "websocket receive error");
                break;
            }
        }
    }

    // Dropping the registration drops the last sender, which ends the
    // writer task on its own.
    registry.unregister(id).await;
    tracing::info!(channel = %id, "live channel disconnected");
}
