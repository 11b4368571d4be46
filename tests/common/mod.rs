use std::time::Duration;

use testcontainers::{core::WaitFor, GenericImage, RunnableImage};

use chat_relay::store::{MessageStore, StoreConfig};

/// The Postgres Docker image to use for testing
pub const POSTGRES_IMAGE: &str = "postgres";
pub const POSTGRES_TAG: &str = "16-alpine";

/// Default PostgreSQL port
pub const POSTGRES_PORT: u16 = 5432;

/// Credentials for the test container
pub const POSTGRES_USER: &str = "user";
pub const POSTGRES_PASSWORD: &str = "password";
pub const POSTGRES_DB: &str = "chatdb";

/// Create a runnable Postgres container
pub fn create_postgres_container() -> RunnableImage<GenericImage> {
    let image = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
        .with_env_var("POSTGRES_USER", POSTGRES_USER)
        .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
        .with_env_var("POSTGRES_DB", POSTGRES_DB)
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ));

    RunnableImage::from(image).with_tag(POSTGRES_TAG)
}

/// Address the mapped container ports are reachable on. Overridable for
/// remote Docker daemons.
pub fn docker_host() -> String {
    dotenvy::dotenv().ok();
    std::env::var("DOCKER_HOST_IP").unwrap_or_else(|_| "127.0.0.1".to_string())
}

/// Store configuration pointing at the mapped container port
pub fn store_config(host: &str, port: u16) -> StoreConfig {
    StoreConfig {
        host: host.to_string(),
        port,
        dbname: POSTGRES_DB.to_string(),
        user: POSTGRES_USER.to_string(),
        password: POSTGRES_PASSWORD.to_string(),
        ..Default::default()
    }
}

/// Connect to the containerized store. Postgres logs the readiness message
/// once during initdb and again after its restart, so early attempts can
/// land in the gap between the two; retry until a session succeeds.
pub async fn connect_store(host: &str, port: u16) -> MessageStore {
    let mut last_err = None;
    for _ in 0..10 {
        match MessageStore::connect(store_config(host, port)).await {
            Ok(store) => return store,
            Err(e) => {
                last_err = Some(e);
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }
    panic!("could not connect to test database: {:?}", last_err);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_targets_mapped_port() {
        let config = store_config("localhost", 5433);
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5433);
        assert_eq!(config.dbname, "chatdb");
        assert_eq!(config.user, "user");
    }
}
