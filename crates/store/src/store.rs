//! Generic document store trait.
//!
//! [`DocumentStore`] provides CRUD plus field-based lookup over one logical
//! collection of one document type. A backend implements it once and is
//! instantiated per entity type, so connection handling is never duplicated
//! across repositories.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreResult;

/// The document field holding the application-level identifier.
///
/// This is distinct from any identifier the backing store assigns on its own.
pub const ID_FIELD: &str = "id";

/// Generic CRUD over a named collection of documents of type `T`.
///
/// # Contracts
///
/// * Creation fails with [`StoreError::Conflict`] when the identifier is
///   already taken. The existence check and the insert are two separate
///   store calls, so two concurrent creates with the same identifier can
///   race; this is a known limitation, not hidden behavior.
/// * Updates are full replaces, never merges, and fail with
///   [`StoreError::NotFound`] when the target is absent.
/// * Field lookups returning no matches are a success with an empty result.
/// * Every operation observes the configured per-call deadline and surfaces
///   an elapsed deadline as [`StoreError::Timeout`].
///
/// [`StoreError::Conflict`]: crate::error::StoreError::Conflict
/// [`StoreError::NotFound`]: crate::error::StoreError::NotFound
/// [`StoreError::Timeout`]: crate::error::StoreError::Timeout
#[async_trait]
pub trait DocumentStore<T>: Send + Sync
where
    T: Send + Sync,
{
    /// The name of the collection this store operates on.
    fn collection_name(&self) -> &str;

    /// Inserts a new document under `id`.
    ///
    /// Fails with `Conflict` if a document with that identifier exists.
    async fn create_document(&self, id: &str, document: &T) -> StoreResult<()>;

    /// Replaces the document stored under `id` in full.
    ///
    /// Fails with `NotFound` if no such document exists.
    async fn update_document(&self, id: &str, document: &T) -> StoreResult<()>;

    /// Removes the document stored under `id`.
    ///
    /// Fails with `NotFound` if no such document exists.
    async fn delete_document(&self, id: &str) -> StoreResult<()>;

    /// Returns the document stored under `id`, or `NotFound`.
    async fn find_document(&self, id: &str) -> StoreResult<T>;

    /// Returns every document in the collection, in the store's natural
    /// order.
    async fn find_all_documents(&self) -> StoreResult<Vec<T>>;

    /// Returns every document whose `field_path` equals `value`.
    ///
    /// The path is dotted and may traverse embedded arrays (for example
    /// `replies.id` matches any document whose embedded `replies` array
    /// contains an entry with the given `id`). Zero matches is `Ok(vec![])`.
    async fn find_documents_by_field(&self, field_path: &str, value: Value) -> StoreResult<Vec<T>>;

    /// Releases the shared connection.
    ///
    /// Idempotent: safe to call repeatedly or concurrently; the connection
    /// is torn down exactly once. Also serves as the explicit teardown hook
    /// for tests.
    async fn disconnect(&self) -> StoreResult<()>;
}
