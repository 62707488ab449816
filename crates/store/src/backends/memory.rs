//! In-memory implementation of the document store.
//!
//! Mirrors the MongoDB backend's CRUD contracts, including dotted
//! field-path lookup through embedded arrays, over a plain map. Used by
//! service-layer tests and local development the way an embedded in-memory
//! database would be; documents are held as JSON values so the store stays
//! generic over the document type.

use std::collections::{BTreeMap, HashSet};
use std::marker::PhantomData;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::store::DocumentStore;

/// Map-backed [`DocumentStore`] for one collection of documents of type `T`.
///
/// `BTreeMap` keeps `find_all_documents` order stable across runs.
pub struct MemoryStore<T> {
    collection: String,
    documents: RwLock<BTreeMap<String, Value>>,
    failing_deletes: RwLock<HashSet<String>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> MemoryStore<T> {
    /// Creates an empty store for the named collection.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            documents: RwLock::new(BTreeMap::new()),
            failing_deletes: RwLock::new(HashSet::new()),
            _marker: PhantomData,
        }
    }

    /// Number of documents currently stored.
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    /// Whether the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    /// Drops every document. Explicit teardown hook for tests.
    pub fn reset(&self) {
        self.documents.write().clear();
        self.failing_deletes.write().clear();
    }

    /// Makes every future `delete_document(id)` fail with a backend error.
    ///
    /// Fault-injection hook for exercising best-effort cascade paths.
    pub fn fail_delete_of(&self, id: impl Into<String>) {
        self.failing_deletes.write().insert(id.into());
    }

    fn not_found(&self, id: &str) -> StoreError {
        StoreError::NotFound {
            collection: self.collection.clone(),
            id: id.to_string(),
        }
    }
}

/// Equality match of `expected` at a dotted `path` inside `value`.
///
/// Objects consume one path segment; arrays are searched element-wise
/// without consuming a segment, which is what makes paths like
/// `replies.id` reach into embedded arrays.
fn matches_path(value: &Value, path: &[&str], expected: &Value) -> bool {
    match path.split_first() {
        None => value == expected,
        Some((head, rest)) => match value {
            Value::Object(map) => map
                .get(*head)
                .is_some_and(|inner| matches_path(inner, rest, expected)),
            Value::Array(items) => items
                .iter()
                .any(|item| matches_path(item, path, expected)),
            _ => false,
        },
    }
}

#[async_trait]
impl<T> DocumentStore<T> for MemoryStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    fn collection_name(&self) -> &str {
        &self.collection
    }

    async fn create_document(&self, id: &str, document: &T) -> StoreResult<()> {
        let encoded = serde_json::to_value(document)?;
        let mut documents = self.documents.write();
        if documents.contains_key(id) {
            return Err(StoreError::Conflict {
                collection: self.collection.clone(),
                id: id.to_string(),
            });
        }
        documents.insert(id.to_string(), encoded);
        Ok(())
    }

    async fn update_document(&self, id: &str, document: &T) -> StoreResult<()> {
        let encoded = serde_json::to_value(document)?;
        let mut documents = self.documents.write();
        if !documents.contains_key(id) {
            return Err(self.not_found(id));
        }
        documents.insert(id.to_string(), encoded);
        Ok(())
    }

    async fn delete_document(&self, id: &str) -> StoreResult<()> {
        if self.failing_deletes.read().contains(id) {
            return Err(StoreError::Backend {
                message: format!("injected delete failure for {id}"),
                source: None,
            });
        }
        let mut documents = self.documents.write();
        if documents.remove(id).is_none() {
            return Err(self.not_found(id));
        }
        Ok(())
    }

    async fn find_document(&self, id: &str) -> StoreResult<T> {
        let encoded = self
            .documents
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| self.not_found(id))?;
        Ok(serde_json::from_value(encoded)?)
    }

    async fn find_all_documents(&self) -> StoreResult<Vec<T>> {
        let encoded: Vec<Value> = self.documents.read().values().cloned().collect();
        encoded
            .into_iter()
            .map(|value| Ok(serde_json::from_value(value)?))
            .collect()
    }

    async fn find_documents_by_field(&self, field_path: &str, value: Value) -> StoreResult<Vec<T>> {
        let segments: Vec<&str> = field_path.split('.').collect();
        let encoded: Vec<Value> = self
            .documents
            .read()
            .values()
            .filter(|doc| matches_path(doc, &segments, &value))
            .cloned()
            .collect();
        encoded
            .into_iter()
            .map(|doc| Ok(serde_json::from_value(doc)?))
            .collect()
    }

    async fn disconnect(&self) -> StoreResult<()> {
        // Nothing to release; kept for trait parity and idempotent by
        // construction.
        Ok(())
    }
}
