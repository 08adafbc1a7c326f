use mongodb::{
    Client,
    bson::doc,
    options::{ReadPreference, SelectionCriteria},
};
use std::time::{Duration, Instant};

use super::MongoError;

/// Database the liveness ping runs against
pub const PING_DATABASE: &str = "admin";

/// Health check status for MongoDB
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the primary answered the ping
    pub healthy: bool,
    /// Optional message (e.g., error details)
    pub message: Option<String>,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

/// Run `{ping: 1}` with read preference `primary` and return the round trip
///
/// Driver failures come back as [`MongoError::Mongo`] with the driver error
/// as their source.
pub async fn ping_primary(client: &Client) -> Result<Duration, MongoError> {
    let start = Instant::now();
    client
        .database(PING_DATABASE)
        .run_command(doc! { "ping": 1 })
        .selection_criteria(SelectionCriteria::ReadPreference(ReadPreference::Primary))
        .await?;
    Ok(start.elapsed())
}

/// Check MongoDB health by pinging the primary
///
/// # Example
/// ```ignore
/// use database::mongodb::{connect, check_health};
///
/// let client = connect(&config).await?;
/// let healthy = check_health(&client).await;
/// ```
pub async fn check_health(client: &Client) -> bool {
    ping_primary(client).await.is_ok()
}

/// Check MongoDB health with detailed status
///
/// Returns timing information and any error messages.
///
/// # Example
/// ```ignore
/// use database::mongodb::{connect, check_health_detailed};
///
/// let client = connect(&config).await?;
/// let status = check_health_detailed(&client).await;
/// if !status.healthy {
///     tracing::warn!(message = ?status.message, "MongoDB unhealthy");
/// }
/// ```
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();

    match ping_primary(client).await {
        Ok(elapsed) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms: elapsed.as_millis() as u64,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms: start.elapsed().as_millis() as u64,
        },
    }
}
