//! Opaque document identifiers.
//!
//! Store identifiers cross the HTTP boundary as 24-character hexadecimal
//! strings. They are kept as plain strings everywhere in the service and only
//! converted to a store-native `ObjectId` at the moment a filter is built.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::ValidationError;

const DOCUMENT_ID_LEN: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid document id: {0}")]
pub struct InvalidDocumentId(pub String);

/// Returns true when `value` has the shape of a store identifier.
pub fn is_valid_document_id(value: &str) -> bool {
    value.len() == DOCUMENT_ID_LEN && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// `validator` hook for payload fields carrying a document id.
pub fn validate_document_id(value: &str) -> Result<(), ValidationError> {
    if is_valid_document_id(value) {
        return Ok(());
    }

    let mut err = ValidationError::new("invalid_document_id");
    err.message = Some(Cow::from(
        "must be a 24-character hexadecimal document identifier",
    ));
    err.add_param(Cow::from("value"), &value);
    Err(err)
}

impl DocumentId {
    pub fn parse(value: &str) -> Result<Self, InvalidDocumentId> {
        if is_valid_document_id(value) {
            Ok(Self(value.to_ascii_lowercase()))
        } else {
            Err(InvalidDocumentId(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_object_id(&self) -> Option<ObjectId> {
        ObjectId::parse_str(&self.0).ok()
    }
}

impl From<ObjectId> for DocumentId {
    fn from(oid: ObjectId) -> Self {
        Self(oid.to_hex())
    }
}

impl FromStr for DocumentId {
    type Err = InvalidDocumentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
