use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use chat_relay::registry::Registry;
use chat_relay::routes::configure_routes;
use chat_relay::store::{MessageStore, StoreConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_relay=info".parse().unwrap()),
        )
        .init();

    let config = StoreConfig::from_env();
    tracing::info!(host = %config.host, dbname = %config.dbname, "connecting to message store");
    let store = MessageStore::connect(config).await?;

    let registry = Arc::new(Registry::new());
    let routes = configure_routes(store, registry);

    tracing::info!("listening on http://0.0.0.0:8000");
    warp::serve(routes).run(([0, 0, 0, 0], 8000)).await;

    Ok(())
}
