//! Image processing module
//!
//! This module provides image processing capabilities including:
//! - Content-based validation (validator)
//! - EXIF orientation handling (orientation)
//! - Sanitization: orientation fix, metadata strip, downscale, re-encode (sanitizer)

pub mod orientation;
pub mod sanitizer;
pub mod validator;

pub use sanitizer::{sanitize, SanitizedImage};
pub use validator::{validate, PhotoFormat, ValidatedImage};
