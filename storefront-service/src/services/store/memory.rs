use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::DocumentStore;
use crate::services::gateway::GatewayError;

type Collections = HashMap<String, Vec<Document>>;

/// Process-local store with exact-match filtering.
///
/// Documents are kept in insertion order, which is also `_id` order because
/// `ObjectId`s generated in one process increase monotonically. Flip
/// [`InMemoryStore::set_available`] to make every call fail like an
/// unreachable database.
pub struct InMemoryStore {
    name: String,
    collections: Mutex<Collections>,
    available: AtomicBool,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_name("storefront_memory")
    }

    pub fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            collections: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of documents currently held in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .map(|c| c.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn guard(&self) -> Result<MutexGuard<'_, Collections>, GatewayError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(GatewayError::Persistence(
                "In-memory store is unavailable".to_string(),
            ));
        }

        self.collections
            .lock()
            .map_err(|e| GatewayError::Persistence(format!("In-memory store mutex poisoned: {}", e)))
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(field, expected)| document.get(field) == Some(expected))
}

fn assign_id(mut document: Document) -> (ObjectId, Document) {
    let oid = match document.get("_id") {
        Some(Bson::ObjectId(oid)) => *oid,
        _ => {
            let oid = ObjectId::new();
            document.insert("_id", oid);
            oid
        }
    };
    (oid, document)
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    fn database_name(&self) -> &str {
        &self.name
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        self.guard().map(|_| ())
    }

    async fn collection_names(&self) -> Result<Vec<String>, GatewayError> {
        let collections = self.guard()?;
        let mut names: Vec<String> = collections.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<ObjectId, GatewayError> {
        let mut collections = self.guard()?;
        let (oid, document) = assign_id(document);
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(oid)
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<usize, GatewayError> {
        let mut collections = self.guard()?;
        let stored = collections.entry(collection.to_string()).or_default();
        let inserted = documents.len();
        stored.extend(documents.into_iter().map(|d| assign_id(d).1));
        Ok(inserted)
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Vec<Document>, GatewayError> {
        let collections = self.guard()?;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| matches(d, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, GatewayError> {
        let collections = self.guard()?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches(d, &filter)).cloned()))
    }

    async fn count(&self, collection: &str, filter: Document) -> Result<u64, GatewayError> {
        let collections = self.guard()?;
        Ok(collections
            .get(collection)
            .map_or(0, |docs| docs.iter().filter(|d| matches(d, &filter)).count()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn exact_match_filtering() {
        let store = InMemoryStore::new();
        store
            .insert_one("product", doc! { "category": "Bags", "title": "Tote" })
            .await
            .unwrap();
        store
            .insert_one("product", doc! { "category": "bags", "title": "Clutch" })
            .await
            .unwrap();

        let found = store
            .find("product", doc! { "category": "Bags" })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_str("title").unwrap(), "Tote");

        assert_eq!(store.count("product", doc! {}).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn empty_filter_returns_insertion_order() {
        let store = InMemoryStore::new();
        let first = store.insert_one("order", doc! { "n": 1 }).await.unwrap();
        let second = store.insert_one("order", doc! { "n": 2 }).await.unwrap();

        let all = store.find("order", doc! {}).await.unwrap();
        assert_eq!(all[0].get_object_id("_id").unwrap(), first);
        assert_eq!(all[1].get_object_id("_id").unwrap(), second);
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = InMemoryStore::new();
        store.set_available(false);

        assert!(matches!(
            store.ping().await,
            Err(GatewayError::Persistence(_))
        ));
        assert!(store.insert_one("product", doc! {}).await.is_err());
        assert!(store.find("product", doc! {}).await.is_err());

        store.set_available(true);
        assert!(store.ping().await.is_ok());
    }
}
