//! Database library providing connectors and utilities for MongoDB
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `config` - Load connection settings with `core_config::FromYaml`
//!
//! # Examples
//!
//! ```ignore
//! use database::mongodb;
//!
//! let config = mongodb::MongoConfig::new("localhost:27017", "mydb");
//! let client = mongodb::connect(&config).await?;
//! let collection = client.database("mydb").collection::<Document>("items");
//! // ...
//! mongodb::release(client).await;
//! ```

#[cfg(feature = "mongodb")]
pub mod mongodb;
