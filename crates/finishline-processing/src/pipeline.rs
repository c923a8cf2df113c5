//! Photo upload pipeline: parse → validate → sanitize → name → store.
//!
//! Validation and sanitization rules live in [`crate::image`]; this module
//! ties them to storage and owns the blocking/timeout treatment of the
//! CPU-bound image work. All rejections are terminal; nothing is persisted
//! unless every step succeeded.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use finishline_core::{AppError, UploadLimits};
use finishline_storage::{derive_photo_key, ObjectStorage};

use crate::image::sanitizer::{sanitize, SanitizedImage};
use crate::image::validator::validate;
use crate::payload::EncodedImagePayload;

/// Result of a stored photo upload, for completion-image creation.
#[derive(Debug, Clone)]
pub struct StoredPhoto {
    pub storage_key: String,
    pub storage_url: String,
    pub width: u32,
    pub height: u32,
    pub byte_size: u64,
    pub content_type: &'static str,
}

/// Run the photo upload pipeline for one encoded payload.
///
/// `uploaded_at` is injected rather than read from the clock so key
/// derivation stays deterministic for the caller.
pub async fn upload_photo(
    payload: &str,
    participant_id: Uuid,
    limits: &UploadLimits,
    storage: Arc<dyn ObjectStorage>,
    uploaded_at: DateTime<Utc>,
) -> Result<StoredPhoto, AppError> {
    let parsed = EncodedImagePayload::parse(payload, limits)?;
    let declared_mime = parsed.declared_mime.clone();

    let validated = validate(parsed.data, limits)?;

    // Sanitization is CPU-bound; run it off the async pool and bound its
    // wall time.
    let limit_secs = limits.sanitize_timeout_secs;
    let sanitize_limits = limits.clone();
    let task = tokio::task::spawn_blocking(move || sanitize(&validated, &sanitize_limits));
    let sanitized = match tokio::time::timeout(Duration::from_secs(limit_secs), task).await {
        Err(_) => return Err(AppError::SanitizationTimeout { limit_secs }),
        Ok(joined) => {
            joined.map_err(|e| AppError::Internal(format!("sanitizer task failed: {}", e)))??
        }
    };

    let storage_key = derive_photo_key(&sanitized.bytes, participant_id, uploaded_at);
    let byte_size = sanitized.bytes.len() as u64;

    let storage_url = storage
        .put(&storage_key, sanitized.bytes, SanitizedImage::CONTENT_TYPE)
        .await
        .map_err(AppError::from)?;

    tracing::info!(
        participant_id = %participant_id,
        storage_key = %storage_key,
        declared_mime = %declared_mime,
        width = sanitized.width,
        height = sanitized.height,
        byte_size,
        "Stored completion photo"
    );

    Ok(StoredPhoto {
        storage_key,
        storage_url,
        width: sanitized.width,
        height: sanitized.height,
        byte_size,
        content_type: SanitizedImage::CONTENT_TYPE,
    })
}
