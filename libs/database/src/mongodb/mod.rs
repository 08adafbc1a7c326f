//! MongoDB database connector and utilities
//!
//! Provides connection management and MongoDB-specific helpers.

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_STARTUP_TIMEOUT_SECS, MongoConfig};
pub use connector::{MongoError, client_options, connect, connect_before, release};
pub use health::{
    HealthStatus, PING_DATABASE, check_health, check_health_detailed, ping_primary,
};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database, bson};
