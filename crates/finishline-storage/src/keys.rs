//! Content-addressed key derivation for stored photos.
//!
//! Key format: `photos/{participant_id}-{unix_ts}-{digest_prefix}.jpg`.
//! All backends must use this format for consistency.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use finishline_core::constants::DIGEST_PREFIX_LEN;

/// Derive the storage key for a sanitized photo.
///
/// The key combines the owning participant's id, the upload timestamp, and
/// a truncated SHA-256 digest of the sanitized bytes. Deterministic for
/// identical inputs; collision probability is bounded by the digest prefix
/// length. No user-supplied filename or extension characters ever reach the
/// key, and the extension is fixed because the sanitizer always emits JPEG.
pub fn derive_photo_key(
    sanitized_bytes: &[u8],
    participant_id: Uuid,
    uploaded_at: DateTime<Utc>,
) -> String {
    let digest = Sha256::digest(sanitized_bytes);
    let prefix = &hex::encode(digest)[..DIGEST_PREFIX_LEN];
    format!(
        "photos/{}-{}-{}.jpg",
        participant_id,
        uploaded_at.timestamp(),
        prefix
    )
}
