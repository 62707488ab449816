//! Document identifier generation.

use uuid::Uuid;

/// Generates a fresh document identifier: 128 random bits, hex-encoded.
///
/// Collision probability is negligible but not formally excluded; callers
/// relying on uniqueness treat the store's duplicate-identifier conflict
/// as the backstop. Known limitation.
pub fn new_document_id() -> String {
    Uuid::new_v4().as_simple().to_string()
}
