//! Finishline Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! validation shared across all Finishline components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::UploadLimits;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use validation::gallery::{normalize_display_order, validate_gallery, CandidateImage};
pub use validation::text::strip_html;
