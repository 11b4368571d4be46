// GET /get/msg handler

use warp::http::StatusCode;

use crate::models::MessageOut;
use crate::reject::StoreFailure;
use crate::store::MessageStore;

/// Return the full history, oldest first.
pub async fn get_messages_handler(store: MessageStore) -> Result<impl warp::Reply, warp::Rejection> {
    let stored = store
        .list_messages()
        .await
        .map_err(|e| warp::reject::custom(StoreFailure(e)))?;

    let messages: Vec<MessageOut> = stored.into_iter().map(MessageOut::from).collect();
    tracing::info!(count = messages.len(), "history served");

    Ok(warp::reply::with_status(
        warp::reply::json(&messages),
        StatusCode::OK,
    ))
}
