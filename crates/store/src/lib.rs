//! Counseling Service Document Store
//!
//! Generic CRUD over a named collection of schema-flexible documents,
//! implemented once and instantiated per entity type. The production
//! backend talks to MongoDB over a lazily-established shared connection
//! with a per-call deadline; an in-memory backend mirrors the same
//! contracts for tests.
//!
//! # Architecture
//!
//! - [`store`] - The [`DocumentStore`] trait: create/read/update/delete
//!   plus dotted-field-path lookup
//! - [`config`] - Per-collection configuration with explicit > environment
//!   > default precedence
//! - [`error`] - The [`StoreError`] taxonomy every backend maps into
//! - [`backends`] - MongoDB and in-memory implementations
//!
//! # Quick Start
//!
//! ```no_run
//! use counseling_store::{MongoStore, StoreConfig, StoreSettings};
//!
//! #[derive(serde::Serialize, serde::Deserialize)]
//! struct Note { id: String, text: String }
//!
//! let config = StoreConfig::resolve(StoreSettings::for_collection(
//!     "ambulance-counseling",
//!     "notes",
//! ));
//! let store: MongoStore<Note> = MongoStore::new(config);
//! ```

#![warn(missing_docs)]

pub mod backends;
pub mod config;
pub mod error;
pub mod store;

pub use backends::{MemoryStore, MongoStore};
pub use config::{StoreConfig, StoreSettings};
pub use error::{StoreError, StoreResult};
pub use store::{DocumentStore, ID_FIELD};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
