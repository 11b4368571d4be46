// POST /post/send handler

use std::sync::Arc;

use warp::http::StatusCode;

use crate::models::{Ack, LiveMessage, SendMessageRequest};
use crate::registry::Registry;
use crate::reject::{StoreFailure, ValidationFailure};
use crate::store::MessageStore;

/// Accept one message: validate, persist, then push to live channels.
/// Persistence happens before fan-out, so a channel never sees a message
/// the history endpoint could not return.
pub async fn send_message_handler(
    request: SendMessageRequest,
    store: MessageStore,
    registry: Arc<Registry>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let valid = request
        .validate()
        .map_err(|errors| warp::reject::custom(ValidationFailure { errors }))?;

    store
        .insert_message(&valid.author, &valid.message)
        .await
        .map_err(|e| warp::reject::custom(StoreFailure(e)))?;

    let live = LiveMessage {
        author: valid.author,
        message: valid.message,
    };
    let delivered = registry.broadcast(&live).await;
    tracing::info!(author = %live.author, delivered, "message accepted");

    Ok(warp::reply::with_status(
        warp::reply::json(&Ack::new("Message sent")),
        StatusCode::OK,
    ))
}
