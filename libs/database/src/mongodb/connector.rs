use mongodb::{
    Client,
    options::{ClientOptions, Credential},
};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use super::MongoConfig;
use super::health::ping_primary;

/// Error type for MongoDB operations
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Timed out after {timeout_secs}s connecting to {host}")]
    Timeout { host: String, timeout_secs: u64 },
}

/// Connect to MongoDB and ping the primary, bounded by the config's startup timeout
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect};
///
/// let config = MongoConfig::new("localhost:27017", "mydb");
/// let client = connect(&config).await?;
/// ```
pub async fn connect(config: &MongoConfig) -> Result<Client, MongoError> {
    let deadline = Instant::now() + Duration::from_secs(config.startup_timeout_secs);
    connect_before(config, deadline).await
}

/// Connect to MongoDB and ping the primary, failing once `deadline` passes
///
/// The deadline covers URI parsing, client construction and the ping, so a
/// caller can start the clock at process launch. There is no retry.
pub async fn connect_before(
    config: &MongoConfig,
    deadline: Instant,
) -> Result<Client, MongoError> {
    info!("Attempting to connect to MongoDB at {}", config.uri());

    with_deadline(config, deadline, async {
        let options = client_options(config).await?;
        let client = Client::with_options(options)?;

        let elapsed = ping_primary(&client).await?;
        debug!(
            host = %config.host(),
            response_time_ms = elapsed.as_millis() as u64,
            "Primary answered ping"
        );

        Ok(client)
    })
    .await
}

/// Build client options from the config: URI, credential and timeouts
pub async fn client_options(config: &MongoConfig) -> Result<ClientOptions, MongoError> {
    let mut options = ClientOptions::parse(config.uri()).await?;

    let timeout = Duration::from_secs(config.startup_timeout_secs);
    options.connect_timeout = Some(timeout);
    options.server_selection_timeout = Some(timeout);

    if config.has_credentials() {
        options.credential = Some(
            Credential::builder()
                .username(config.username.clone())
                .password(config.password.clone())
                .build(),
        );
    }

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    Ok(options)
}

/// Shut the client down.
///
/// Takes the client by value so a handle cannot be released twice.
/// Clones sharing the same pool stop working once this returns.
pub async fn release(client: Client) {
    info!("Closing MongoDB connection");
    client.shutdown().await;
    info!("MongoDB connection closed successfully");
}

async fn with_deadline<T, F>(
    config: &MongoConfig,
    deadline: Instant,
    fut: F,
) -> Result<T, MongoError>
where
    F: Future<Output = Result<T, MongoError>>,
{
    tokio::time::timeout_at(deadline, fut)
        .await
        .map_err(|_| MongoError::Timeout {
            host: config.host().to_string(),
            timeout_secs: config.startup_timeout_secs,
        })?
}
