// Route definitions and filter wiring

use std::convert::Infallible;
use std::sync::Arc;

use warp::Filter;

use crate::handlers;
use crate::registry::Registry;
use crate::reject;
use crate::store::MessageStore;

/// Assemble the full filter tree: the three endpoints, the shared rejection
/// handler and the permissive CORS layer.
pub fn configure_routes(
    store: MessageStore,
    registry: Arc<Registry>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // POST /post/send
    let send_message = warp::path("post")
        .and(warp::path("send"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_store(store.clone()))
        .and(with_registry(registry.clone()))
        .and_then(handlers::send_message_handler);

    // GET /get/msg
    let get_messages = warp::path("get")
        .and(warp::path("msg"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_store(store))
        .and_then(handlers::get_messages_handler);

    // GET /ws
    let live_channel = warp::path("ws")
        .and(warp::path::end())
        .and(warp::ws())
        .and(with_registry(registry))
        .map(handlers::ws_handler);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_credentials(true)
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    // Combine routes
    send_message
        .or(get_messages)
        .or(live_channel)
        .recover(reject::handle_rejection)
        .with(cors)
}

fn with_store(
    store: MessageStore,
) -> impl Filter<Extract = (MessageStore,), Error = Infallible> + Clone {
    warp::any().map(move || store.clone())
}

fn with_registry(
    registry: Arc<Registry>,
) -> impl Filter<Extract = (Arc<Registry>,), Error = Infallible> + Clone {
    warp::any().map(move || registry.clone())
}
