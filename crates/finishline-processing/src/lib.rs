//! Finishline Processing Library
//!
//! Image ingestion for completion photos: encoded-payload parsing,
//! content-based validation, sanitization (orientation correction, metadata
//! stripping, downscaling, canonical JPEG re-encode), and the upload
//! pipeline that ties those steps to storage.

pub mod image;
pub mod payload;
pub mod pipeline;

pub use image::sanitizer::{sanitize, SanitizedImage};
pub use image::validator::{validate, PhotoFormat, ValidatedImage};
pub use payload::EncodedImagePayload;
pub use pipeline::{upload_photo, StoredPhoto};
