//! MongoDB implementation of the document store.
//!
//! One [`MongoStore`] owns one lazily-established client shared by all
//! operations on its collection. The first caller connects under a lock;
//! later callers take the lock-free read path. Every operation runs under
//! the configured per-call deadline.

use std::marker::PhantomData;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::timeout;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::store::{DocumentStore, ID_FIELD};

/// MongoDB-backed [`DocumentStore`] for one collection of documents of
/// type `T`.
pub struct MongoStore<T> {
    config: StoreConfig,
    client: RwLock<Option<Client>>,
    connect_lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> MongoStore<T> {
    /// Creates a store for the given resolved configuration.
    ///
    /// No connection is established until the first operation runs.
    pub fn new(config: StoreConfig) -> Self {
        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            collection = %config.collection,
            "document store configured"
        );
        Self {
            config,
            client: RwLock::new(None),
            connect_lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    /// The resolved configuration this store was built with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn timeout_ms(&self) -> u64 {
        self.config.timeout.as_millis() as u64
    }

    fn not_found(&self, id: &str) -> StoreError {
        StoreError::NotFound {
            collection: self.config.collection.clone(),
            id: id.to_string(),
        }
    }

    fn conflict(&self, id: &str) -> StoreError {
        StoreError::Conflict {
            collection: self.config.collection.clone(),
            id: id.to_string(),
        }
    }

    fn id_filter(id: &str) -> Document {
        let mut filter = Document::new();
        filter.insert(ID_FIELD, id);
        filter
    }

    /// Runs `op` under the configured per-call deadline.
    async fn with_deadline<F, O>(&self, op: F) -> StoreResult<O>
    where
        F: Future<Output = StoreResult<O>>,
    {
        match timeout(self.config.timeout, op).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout {
                timeout_ms: self.timeout_ms(),
            }),
        }
    }

    /// Returns the shared client, establishing it on first use.
    ///
    /// Optimistic lock-free read first; on miss, the async mutex serializes
    /// connection setup and the slot is re-checked before connecting, so at
    /// most one setup attempt runs.
    async fn connect(&self) -> StoreResult<Client> {
        if let Some(client) = self.client.read().clone() {
            return Ok(client);
        }

        let _guard = self.connect_lock.lock().await;
        if let Some(client) = self.client.read().clone() {
            return Ok(client);
        }

        let uri = self.config.connection_uri();
        let mut options = ClientOptions::parse(&uri)
            .await
            .map_err(|err| StoreError::Connection {
                message: err.to_string(),
            })?;
        options.connect_timeout = Some(self.config.timeout);
        options.server_selection_timeout = Some(self.config.timeout);

        let client = Client::with_options(options).map_err(|err| StoreError::Connection {
            message: err.to_string(),
        })?;
        *self.client.write() = Some(client.clone());
        tracing::info!(
            database = %self.config.database,
            collection = %self.config.collection,
            "store connection established"
        );
        Ok(client)
    }

    async fn collection(&self) -> StoreResult<Collection<T>>
    where
        T: Send + Sync,
    {
        let client = self.connect().await?;
        Ok(client
            .database(&self.config.database)
            .collection(&self.config.collection))
    }
}

#[async_trait]
impl<T> DocumentStore<T> for MongoStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    fn collection_name(&self) -> &str {
        &self.config.collection
    }

    async fn create_document(&self, id: &str, document: &T) -> StoreResult<()> {
        self.with_deadline(async {
            let collection = self.collection().await?;
            // Existence check and insert are two separate calls; concurrent
            // creates with the same identifier can race. Known limitation.
            let existing = collection
                .clone_with_type::<Document>()
                .find_one(Self::id_filter(id))
                .await?;
            if existing.is_some() {
                return Err(self.conflict(id));
            }
            collection.insert_one(document).await?;
            Ok(())
        })
        .await
    }

    async fn update_document(&self, id: &str, document: &T) -> StoreResult<()> {
        self.with_deadline(async {
            let collection = self.collection().await?;
            let existing = collection
                .clone_with_type::<Document>()
                .find_one(Self::id_filter(id))
                .await?;
            if existing.is_none() {
                return Err(self.not_found(id));
            }
            collection.replace_one(Self::id_filter(id), document).await?;
            Ok(())
        })
        .await
    }

    async fn delete_document(&self, id: &str) -> StoreResult<()> {
        self.with_deadline(async {
            let collection = self.collection().await?.clone_with_type::<Document>();
            let existing = collection.find_one(Self::id_filter(id)).await?;
            if existing.is_none() {
                return Err(self.not_found(id));
            }
            collection.delete_one(Self::id_filter(id)).await?;
            Ok(())
        })
        .await
    }

    async fn find_document(&self, id: &str) -> StoreResult<T> {
        self.with_deadline(async {
            let collection = self.collection().await?;
            collection
                .find_one(Self::id_filter(id))
                .await?
                .ok_or_else(|| self.not_found(id))
        })
        .await
    }

    async fn find_all_documents(&self) -> StoreResult<Vec<T>> {
        self.with_deadline(async {
            let collection = self.collection().await?;
            let cursor = collection.find(Document::new()).await?;
            Ok(cursor.try_collect().await?)
        })
        .await
    }

    async fn find_documents_by_field(&self, field_path: &str, value: Value) -> StoreResult<Vec<T>> {
        self.with_deadline(async {
            let collection = self.collection().await?;
            let bson_value = bson::to_bson(&value).map_err(|err| StoreError::Serialization {
                message: err.to_string(),
            })?;
            let mut filter = Document::new();
            filter.insert(field_path, bson_value);
            let cursor = collection.find(filter).await?;
            Ok(cursor.try_collect().await?)
        })
        .await
    }

    async fn disconnect(&self) -> StoreResult<()> {
        // The setup lock also serializes teardown, so the client is shut
        // down exactly once even under concurrent disconnect calls.
        let _guard = self.connect_lock.lock().await;
        let client = self.client.write().take();
        if let Some(client) = client {
            client.shutdown().await;
            tracing::info!(collection = %self.config.collection, "store connection released");
        }
        Ok(())
    }
}
