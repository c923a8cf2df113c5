//! Validation constants fixed at build time.
//!
//! These are the defaults for [`UploadLimits`](crate::config::UploadLimits);
//! individual values can be overridden through the environment for ops tuning.

/// Largest accepted encoded image payload after base64 decoding.
pub const MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Smallest accepted payload. Anything under 1KiB is not a real photo.
pub const MIN_FILE_SIZE_BYTES: usize = 1024;

/// Upper bound on the summed byte size of all images in one completion.
pub const MAX_GALLERY_TOTAL_BYTES: u64 = 50 * 1024 * 1024;

/// Images attached to a completion must number between these bounds.
pub const MIN_IMAGES_PER_COMPLETION: usize = 1;
pub const MAX_IMAGES_PER_COMPLETION: usize = 10;

/// Neither image dimension may exceed this, before or after sanitization.
pub const MAX_DIMENSION_PX: u32 = 4096;

/// Caption length bound, counted after trimming.
pub const MAX_CAPTION_CHARS: usize = 200;

/// Quality setting for the canonical JPEG re-encode.
pub const OUTPUT_JPEG_QUALITY: u8 = 80;

/// Hex characters of the content digest kept in storage keys.
pub const DIGEST_PREFIX_LEN: usize = 16;

/// Upper bound on sanitization wall time per image.
pub const SANITIZE_TIMEOUT_SECS: u64 = 30;
