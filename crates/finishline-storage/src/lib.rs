//! Finishline Storage Library
//!
//! This crate provides the object-storage abstraction used by the photo
//! upload pipeline, a local-filesystem backend, and an in-memory backend
//! for tests and development.
//!
//! # Storage key format
//!
//! Photo keys are content-addressed and derived exclusively in the `keys`
//! module: `photos/{participant_id}-{unix_ts}-{digest_prefix}.jpg`. No
//! user-supplied filename or extension characters are ever interpolated
//! into a key. Keys must not contain `..` or a leading `/`.

pub mod keys;
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use keys::derive_photo_key;
pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use traits::{ObjectStorage, StorageError, StorageResult};
