use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{FindOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

use super::DocumentStore;
use crate::models::{ORDER_COLLECTION, PRODUCT_COLLECTION};
use crate::services::gateway::GatewayError;

#[derive(Clone)]
pub struct MongoStore {
    client: MongoClient,
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for storefront-service");

        // Backs GET /api/products?category=
        let category_index = IndexModel::builder()
            .keys(doc! { "category": 1 })
            .options(
                IndexOptions::builder()
                    .name("category_idx".to_string())
                    .build(),
            )
            .build();

        self.collection(PRODUCT_COLLECTION)
            .create_index(category_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create category index: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        // Backs GET /api/orders?email=
        let email_index = IndexModel::builder()
            .keys(doc! { "customer_email": 1 })
            .options(
                IndexOptions::builder()
                    .name("customer_email_idx".to_string())
                    .build(),
            )
            .build();

        self.collection(ORDER_COLLECTION)
            .create_index(email_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create customer_email index: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        tracing::info!("Successfully created all MongoDB indexes");
        Ok(())
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }
}

fn persistence_error(action: &str, err: mongodb::error::Error) -> GatewayError {
    tracing::error!("Failed to {}: {}", action, err);
    GatewayError::Persistence(err.to_string())
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn database_name(&self) -> &str {
        self.db.name()
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| persistence_error("ping MongoDB", e))?;
        Ok(())
    }

    async fn collection_names(&self) -> Result<Vec<String>, GatewayError> {
        self.db
            .list_collection_names(None)
            .await
            .map_err(|e| persistence_error("list collections", e))
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<ObjectId, GatewayError> {
        let result = self
            .collection(collection)
            .insert_one(document, None)
            .await
            .map_err(|e| persistence_error("insert document", e))?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            GatewayError::Persistence(format!(
                "Store returned a non-ObjectId identifier: {}",
                result.inserted_id
            ))
        })
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<usize, GatewayError> {
        let result = self
            .collection(collection)
            .insert_many(documents, None)
            .await
            .map_err(|e| persistence_error("insert documents", e))?;

        Ok(result.inserted_ids.len())
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Vec<Document>, GatewayError> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();

        let cursor = self
            .collection(collection)
            .find(filter, options)
            .await
            .map_err(|e| persistence_error("query documents", e))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| persistence_error("collect documents", e))
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, GatewayError> {
        self.collection(collection)
            .find_one(filter, None)
            .await
            .map_err(|e| persistence_error("find document", e))
    }

    async fn count(&self, collection: &str, filter: Document) -> Result<u64, GatewayError> {
        self.collection(collection)
            .count_documents(filter, None)
            .await
            .map_err(|e| persistence_error("count documents", e))
    }
}
