//! Document store backends.
//!
//! The gateway talks to the store only through [`DocumentStore`], so the
//! handle is injected at startup and tests can swap in [`InMemoryStore`].

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

use super::gateway::GatewayError;

pub use memory::InMemoryStore;
pub use mongo::MongoStore;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn database_name(&self) -> &str;

    async fn ping(&self) -> Result<(), GatewayError>;

    async fn collection_names(&self) -> Result<Vec<String>, GatewayError>;

    /// Insert one document; the store assigns `_id` when absent.
    async fn insert_one(&self, collection: &str, document: Document)
        -> Result<ObjectId, GatewayError>;

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<usize, GatewayError>;

    /// Documents matching every field of `filter`, ascending by `_id`.
    async fn find(&self, collection: &str, filter: Document)
        -> Result<Vec<Document>, GatewayError>;

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, GatewayError>;

    async fn count(&self, collection: &str, filter: Document) -> Result<u64, GatewayError>;
}
