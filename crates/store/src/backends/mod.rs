//! Document store backends.
//!
//! [`mongo`] is the production backend; [`memory`] mirrors its contracts
//! over a plain map for tests and local development.

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
