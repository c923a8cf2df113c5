//! Error types module
//!
//! All expected failure conditions are unified under the `AppError` enum:
//! image validation and sanitization rejections, authorization failures,
//! gallery aggregate violations, and backend faults.
//!
//! Validation and authorization failures are expected, recoverable results,
//! not faults: they carry enough structure for a user-facing message but are
//! never retried automatically. Backend faults (`Storage`, `Internal`) are
//! sensitive: their full detail is logged server-side only and the client
//! sees a generic message.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like resource limits
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UNSUPPORTED_FORMAT")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether internal details must be hidden from the client
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // --- image payload validation ---
    #[error("Invalid payload encoding: {0}")]
    InvalidEncoding(String),

    #[error("File too small: {size} bytes (min: {min} bytes)")]
    TooSmall { size: usize, min: usize },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: usize, max: usize },

    #[error("Payload is not a decodable image: {0}")]
    NotAnImage(String),

    #[error("Unsupported image format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Image dimensions {width}x{height} exceed maximum of {max}px")]
    DimensionExceeded { width: u32, height: u32, max: u32 },

    #[error("Image sanitization failed: {0}")]
    SanitizationFailed(String),

    #[error("Image sanitization exceeded {limit_secs}s limit")]
    SanitizationTimeout { limit_secs: u64 },

    // --- authorization ---
    #[error("No authenticated identity")]
    Unauthenticated,

    #[error("Identity has no linked participant record")]
    NoParticipantRecord,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Voting for your own completion is not allowed")]
    SelfVoteForbidden,

    // --- gallery aggregate ---
    #[error("Too few images: {count} (min: {min})")]
    TooFewImages { count: usize, min: usize },

    #[error("Too many images: {count} (max: {max})")]
    TooManyImages { count: usize, max: usize },

    #[error("Total image size {total} bytes exceeds maximum of {max} bytes")]
    TotalSizeExceeded { total: u64, max: u64 },

    #[error("No image is marked as the cover photo")]
    NoStarredImage,

    #[error("{count} images are marked as the cover photo, expected exactly one")]
    MultipleStarredImages { count: usize },

    #[error("Caption is {length} characters (max: {max})")]
    CaptionTooLong { length: usize, max: usize },

    // --- ambient ---
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("UUID parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, sensitive, log_level).
/// client_message stays per-variant for dynamic content.
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::InvalidEncoding(_) => (400, "INVALID_ENCODING", false, LogLevel::Debug),
        AppError::TooSmall { .. } => (400, "FILE_TOO_SMALL", false, LogLevel::Debug),
        AppError::TooLarge { .. } => (413, "FILE_TOO_LARGE", false, LogLevel::Warn),
        AppError::NotAnImage(_) => (400, "NOT_AN_IMAGE", true, LogLevel::Warn),
        AppError::UnsupportedFormat { .. } => (400, "UNSUPPORTED_FORMAT", false, LogLevel::Debug),
        AppError::DimensionExceeded { .. } => (400, "DIMENSION_EXCEEDED", false, LogLevel::Debug),
        AppError::SanitizationFailed(_) => (422, "SANITIZATION_FAILED", true, LogLevel::Warn),
        AppError::SanitizationTimeout { .. } => (422, "SANITIZATION_TIMEOUT", false, LogLevel::Warn),
        AppError::Unauthenticated => (401, "UNAUTHENTICATED", false, LogLevel::Debug),
        AppError::NoParticipantRecord => (403, "NO_PARTICIPANT_RECORD", false, LogLevel::Debug),
        AppError::NotFound(_) => (404, "NOT_FOUND", false, LogLevel::Debug),
        AppError::Forbidden(_) => (403, "FORBIDDEN", false, LogLevel::Debug),
        AppError::SelfVoteForbidden => (403, "SELF_VOTE_FORBIDDEN", false, LogLevel::Debug),
        AppError::TooFewImages { .. } => (400, "TOO_FEW_IMAGES", false, LogLevel::Debug),
        AppError::TooManyImages { .. } => (400, "TOO_MANY_IMAGES", false, LogLevel::Debug),
        AppError::TotalSizeExceeded { .. } => (413, "TOTAL_SIZE_EXCEEDED", false, LogLevel::Warn),
        AppError::NoStarredImage => (400, "NO_STARRED_IMAGE", false, LogLevel::Debug),
        AppError::MultipleStarredImages { .. } => {
            (400, "MULTIPLE_STARRED_IMAGES", false, LogLevel::Debug)
        }
        AppError::CaptionTooLong { .. } => (400, "CAPTION_TOO_LONG", false, LogLevel::Debug),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", false, LogLevel::Debug),
        AppError::Storage(_) => (500, "STORAGE_ERROR", true, LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl AppError {
    /// Get detailed error information including the source chain.
    /// For server-side logs only; never send this to a client.
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidEncoding(_) => {
                "The uploaded data is not a valid image payload".to_string()
            }
            AppError::TooSmall { .. } => "This file is too small to be a photo".to_string(),
            AppError::TooLarge { size: _, max } => {
                format!("This file is too large (max {}MB)", max / (1024 * 1024))
            }
            // Decoder internals stay server-side; the client gets a fixed message.
            AppError::NotAnImage(_) => "The uploaded file is not a valid image".to_string(),
            AppError::UnsupportedFormat { format } => {
                format!("Images in {} format are not supported", format)
            }
            AppError::DimensionExceeded { max, .. } => {
                format!("Images may be at most {}x{} pixels", max, max)
            }
            AppError::SanitizationFailed(_) => "We could not process this image".to_string(),
            AppError::SanitizationTimeout { .. } => {
                "Processing this image took too long, try a smaller file".to_string()
            }
            AppError::Unauthenticated => "Please sign in to continue".to_string(),
            AppError::NoParticipantRecord => {
                "Your account is not registered for this event".to_string()
            }
            AppError::NotFound(ref msg) => msg.clone(),
            // Uniform wording for all ownership denials; see authorizer docs on
            // existence leakage.
            AppError::Forbidden(_) => {
                "You are not authorized to modify this resource".to_string()
            }
            AppError::SelfVoteForbidden => {
                "You cannot vote for your own completion".to_string()
            }
            AppError::TooFewImages { min, .. } => {
                format!("Please attach at least {} photo", min)
            }
            AppError::TooManyImages { max, .. } => {
                format!("You can attach at most {} photos", max)
            }
            AppError::TotalSizeExceeded { max, .. } => {
                format!("Photos may total at most {}MB", max / (1024 * 1024))
            }
            AppError::NoStarredImage => "Please choose a cover photo".to_string(),
            AppError::MultipleStarredImages { .. } => {
                "Only one photo can be the cover photo".to_string()
            }
            AppError::CaptionTooLong { max, .. } => {
                format!("Captions may be at most {} characters", max)
            }
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::Storage(_) => "Something went wrong, please try again".to_string(),
            AppError::Internal(_) => "Something went wrong, please try again".to_string(),
            AppError::InternalWithSource { .. } => {
                "Something went wrong, please try again".to_string()
            }
        }
    }
}
