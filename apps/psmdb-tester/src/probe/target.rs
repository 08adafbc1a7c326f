use async_trait::async_trait;
use database::mongodb::{
    Collection, Database,
    bson::{Document, doc},
};
use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Database error: {0}")]
    Database(String),
}

pub type ProbeResult<T> = Result<T, ProbeError>;

impl From<mongodb::error::Error> for ProbeError {
    fn from(err: mongodb::error::Error) -> Self {
        ProbeError::Database(err.to_string())
    }
}

/// The store a prober exercises.
///
/// Implementations issue exactly one request per call and never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProbeTarget: Send + Sync {
    /// `<database>.<collection>`, used to tag every outcome line
    fn namespace(&self) -> String;

    /// Insert the constant probe document
    async fn insert_probe_document(&self) -> ProbeResult<()>;

    /// Run an unfiltered find and discard the cursor
    async fn find_all(&self) -> ProbeResult<()>;
}

/// The document written on every write tick
pub fn probe_document() -> Document {
    doc! { "name": "ege" }
}

/// MongoDB collection probed by both probers
#[derive(Clone)]
pub struct MongoProbeTarget {
    collection: Collection<Document>,
}

impl MongoProbeTarget {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Document>(collection_name),
        }
    }

    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }
}

#[async_trait]
impl ProbeTarget for MongoProbeTarget {
    fn namespace(&self) -> String {
        self.collection.namespace().to_string()
    }

    #[instrument(level = "debug", skip(self), fields(collection = %self.collection.name()))]
    async fn insert_probe_document(&self) -> ProbeResult<()> {
        self.collection.insert_one(probe_document()).await?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self), fields(collection = %self.collection.name()))]
    async fn find_all(&self) -> ProbeResult<()> {
        let _cursor = self.collection.find(doc! {}).await?;
        Ok(())
    }
}
