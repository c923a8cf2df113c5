//! Configuration module
//!
//! Upload and validation limits are fixed at build time in
//! [`constants`](crate::constants) but each can be overridden through the
//! environment (`FINISHLINE_*` variables) for ops tuning.

use std::env;

use crate::constants;

/// Limits applied by the image validation/sanitization pipeline and the
/// gallery aggregate validator.
#[derive(Clone, Debug)]
pub struct UploadLimits {
    pub max_file_size_bytes: usize,
    pub min_file_size_bytes: usize,
    pub max_gallery_total_bytes: u64,
    pub min_images_per_completion: usize,
    pub max_images_per_completion: usize,
    pub max_dimension_px: u32,
    pub max_caption_chars: usize,
    pub output_jpeg_quality: u8,
    pub sanitize_timeout_secs: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size_bytes: constants::MAX_FILE_SIZE_BYTES,
            min_file_size_bytes: constants::MIN_FILE_SIZE_BYTES,
            max_gallery_total_bytes: constants::MAX_GALLERY_TOTAL_BYTES,
            min_images_per_completion: constants::MIN_IMAGES_PER_COMPLETION,
            max_images_per_completion: constants::MAX_IMAGES_PER_COMPLETION,
            max_dimension_px: constants::MAX_DIMENSION_PX,
            max_caption_chars: constants::MAX_CAPTION_CHARS,
            output_jpeg_quality: constants::OUTPUT_JPEG_QUALITY,
            sanitize_timeout_secs: constants::SANITIZE_TIMEOUT_SECS,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl UploadLimits {
    /// Build limits from the environment, falling back to compiled defaults.
    /// Loads `.env` if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        let limits = Self {
            max_file_size_bytes: env_parse(
                "FINISHLINE_MAX_FILE_SIZE_BYTES",
                defaults.max_file_size_bytes,
            ),
            min_file_size_bytes: env_parse(
                "FINISHLINE_MIN_FILE_SIZE_BYTES",
                defaults.min_file_size_bytes,
            ),
            max_gallery_total_bytes: env_parse(
                "FINISHLINE_MAX_GALLERY_TOTAL_BYTES",
                defaults.max_gallery_total_bytes,
            ),
            min_images_per_completion: env_parse(
                "FINISHLINE_MIN_IMAGES_PER_COMPLETION",
                defaults.min_images_per_completion,
            ),
            max_images_per_completion: env_parse(
                "FINISHLINE_MAX_IMAGES_PER_COMPLETION",
                defaults.max_images_per_completion,
            ),
            max_dimension_px: env_parse("FINISHLINE_MAX_DIMENSION_PX", defaults.max_dimension_px),
            max_caption_chars: env_parse(
                "FINISHLINE_MAX_CAPTION_CHARS",
                defaults.max_caption_chars,
            ),
            output_jpeg_quality: env_parse(
                "FINISHLINE_OUTPUT_JPEG_QUALITY",
                defaults.output_jpeg_quality,
            ),
            sanitize_timeout_secs: env_parse(
                "FINISHLINE_SANITIZE_TIMEOUT_SECS",
                defaults.sanitize_timeout_secs,
            ),
        };
        tracing::debug!(
            max_file_size_bytes = limits.max_file_size_bytes,
            max_gallery_total_bytes = limits.max_gallery_total_bytes,
            max_images_per_completion = limits.max_images_per_completion,
            max_dimension_px = limits.max_dimension_px,
            "Loaded upload limits"
        );
        limits
    }
}
