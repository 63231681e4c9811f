//! Document gateway.
//!
//! Sits between handlers and the document store. Records go in as typed,
//! validated Rust values; documents come out in their public JSON form, with
//! the store's `_id` exposed as `id` and timestamps rendered as RFC 3339 text.

use chrono::SecondsFormat;
use mongodb::bson::{self, doc, Bson, DateTime as BsonDateTime, Document};
use serde::Serialize;
use serde_json::{Map, Number, Value};
use service_core::error::AppError;
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

use super::store::DocumentStore;
use crate::models::DocumentId;

/// Public field carrying the document identifier.
pub const ID_FIELD: &str = "id";
/// Store-internal identifier field. Never leaves the gateway.
pub const STORE_ID_FIELD: &str = "_id";
pub const CREATED_AT_FIELD: &str = "created_at";
pub const UPDATED_AT_FIELD: &str = "updated_at";

/// A document as returned to callers.
pub type PublicDocument = Map<String, Value>;

/// A typed record bound to the collection that stores it.
pub trait Record: Serialize + Validate + Send + Sync {
    const COLLECTION: &'static str;
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<bson::ser::Error> for GatewayError {
    fn from(err: bson::ser::Error) -> Self {
        GatewayError::Serialization(err.to_string())
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Validation(e) => AppError::ValidationError(e),
            GatewayError::Persistence(msg) => AppError::DatabaseError(anyhow::anyhow!(msg)),
            GatewayError::Serialization(msg) => AppError::InternalError(anyhow::anyhow!(msg)),
        }
    }
}

/// Exact-match filter: every field must equal the given value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Document);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.0.insert(field, value);
        self
    }

    /// Adds the condition only for a present, non-empty value.
    pub fn eq_if_present(self, field: &str, value: Option<&str>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => self.eq(field, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_document(self) -> Document {
        self.0
    }
}

#[derive(Clone)]
pub struct DocumentGateway {
    store: Arc<dyn DocumentStore>,
}

impl DocumentGateway {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a record, returning the identifier the store
    /// assigned to it.
    #[tracing::instrument(skip(self, record), fields(collection = R::COLLECTION))]
    pub async fn insert<R: Record>(&self, record: &R) -> Result<DocumentId, GatewayError> {
        let document = prepare(record, BsonDateTime::now())?;
        let oid = self.store.insert_one(R::COLLECTION, document).await?;
        let id = DocumentId::from(oid);
        tracing::debug!(id = %id, "Inserted document");
        Ok(id)
    }

    /// Validate every record first, then persist them in one write.
    #[tracing::instrument(skip(self, records), fields(collection = R::COLLECTION, count = records.len()))]
    pub async fn insert_many<R: Record>(&self, records: &[R]) -> Result<usize, GatewayError> {
        if records.is_empty() {
            return Ok(0);
        }

        let now = BsonDateTime::now();
        let documents = records
            .iter()
            .map(|record| prepare(record, now))
            .collect::<Result<Vec<_>, _>>()?;

        self.store.insert_many(R::COLLECTION, documents).await
    }

    /// Documents matching `filter`, ordered by identifier.
    pub async fn query(
        &self,
        collection: &str,
        filter: Filter,
    ) -> Result<Vec<PublicDocument>, GatewayError> {
        let documents = self.store.find(collection, filter.into_document()).await?;
        Ok(documents.into_iter().map(to_public).collect())
    }

    pub async fn find_by_id(
        &self,
        collection: &str,
        id: &DocumentId,
    ) -> Result<Option<PublicDocument>, GatewayError> {
        let Some(oid) = id.to_object_id() else {
            return Ok(None);
        };

        let document = self
            .store
            .find_one(collection, doc! { "_id": oid })
            .await?;

        Ok(document.map(to_public))
    }

    pub async fn count(&self, collection: &str, filter: Filter) -> Result<u64, GatewayError> {
        self.store.count(collection, filter.into_document()).await
    }

    pub async fn collection_names(&self) -> Result<Vec<String>, GatewayError> {
        self.store.collection_names().await
    }

    pub fn database_name(&self) -> &str {
        self.store.database_name()
    }

    pub async fn ping(&self) -> Result<(), GatewayError> {
        self.store.ping().await
    }
}

fn prepare<R: Record>(record: &R, now: BsonDateTime) -> Result<Document, GatewayError> {
    record.validate()?;

    let mut document = bson::to_document(record)?;
    document.remove(STORE_ID_FIELD);
    document.insert(CREATED_AT_FIELD, now);
    document.insert(UPDATED_AT_FIELD, now);
    Ok(document)
}

/// Convert a stored document to its public form.
///
/// `_id` becomes `id` (and wins over any stored `id` field). Datetimes become
/// RFC 3339 strings at any depth; object ids become hex strings.
pub fn to_public(mut document: Document) -> PublicDocument {
    let store_id = document.remove(STORE_ID_FIELD);

    let mut public: PublicDocument = document
        .into_iter()
        .map(|(key, value)| (key, to_public_value(value)))
        .collect();

    if let Some(id) = store_id {
        public.insert(ID_FIELD.to_string(), Value::String(id_to_string(id)));
    }

    public
}

fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

fn to_public_value(value: Bson) -> Value {
    match value {
        Bson::DateTime(dt) => Value::String(format_timestamp(dt)),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Double(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        Bson::Document(nested) => Value::Object(
            nested
                .into_iter()
                .map(|(key, value)| (key, to_public_value(value)))
                .collect(),
        ),
        Bson::Array(items) => Value::Array(items.into_iter().map(to_public_value).collect()),
        other => other.into_relaxed_extjson(),
    }
}

fn format_timestamp(dt: BsonDateTime) -> String {
    dt.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn store_id_is_renamed_to_id() {
        let oid = ObjectId::new();
        let public = to_public(doc! { "_id": oid, "title": "Vase", "price": 2299.0 });

        assert_eq!(public.get("id"), Some(&Value::String(oid.to_hex())));
        assert!(!public.contains_key("_id"));
        assert_eq!(public.get("title"), Some(&Value::String("Vase".into())));
        assert_eq!(public.get("price").and_then(Value::as_f64), Some(2299.0));
    }

    #[test]
    fn store_id_overrides_stored_id_field() {
        let oid = ObjectId::new();
        let public = to_public(doc! { "_id": oid, "id": "legacy" });
        assert_eq!(public.get("id"), Some(&Value::String(oid.to_hex())));
    }

    #[test]
    fn timestamps_become_rfc3339_text() {
        let dt = BsonDateTime::from_millis(1_700_000_000_123);
        let public = to_public(doc! {
            "_id": ObjectId::new(),
            "created_at": dt,
            "nested": { "seen_at": dt },
        });

        assert_eq!(
            public.get("created_at"),
            Some(&Value::String("2023-11-14T22:13:20.123Z".into()))
        );
        assert_eq!(
            public["nested"]["seen_at"],
            Value::String("2023-11-14T22:13:20.123Z".into())
        );
    }

    #[test]
    fn arrays_and_integers_are_preserved() {
        let public = to_public(doc! {
            "_id": ObjectId::new(),
            "items": [ { "product_id": "abc", "quantity": 2_i64 } ],
            "customer_phone": Bson::Null,
        });

        assert_eq!(public["items"][0]["quantity"], Value::from(2));
        assert_eq!(public["items"][0]["product_id"], Value::from("abc"));
        assert_eq!(public["customer_phone"], Value::Null);
    }

    #[test]
    fn filter_skips_empty_values() {
        assert!(Filter::new().eq_if_present("category", None).is_empty());
        assert!(Filter::new().eq_if_present("category", Some("")).is_empty());

        let filter = Filter::new().eq_if_present("category", Some("Bags"));
        assert_eq!(filter.into_document(), doc! { "category": "Bags" });
    }
}
