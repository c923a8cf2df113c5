//! Encoded upload payload parsing.
//!
//! Completion photos arrive as MIME-typed base64 strings in the
//! `mime;base64,data` shape, optionally with a `data:` scheme prefix. The
//! declared MIME type is advisory only; content-based validation in
//! [`crate::image::validator`] is authoritative.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use finishline_core::{AppError, UploadLimits};

/// Declared MIME types accepted at the payload boundary. HEIC may be
/// declared (phone cameras produce it) but the trusted decoder does not
/// decode it, so HEIC content is rejected later at the probe.
const ACCEPTED_DECLARED_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/heic",
    "image/heif",
];

/// A parsed upload payload: declared MIME type plus decoded raw bytes.
#[derive(Debug, Clone)]
pub struct EncodedImagePayload {
    pub declared_mime: String,
    pub data: Vec<u8>,
}

impl EncodedImagePayload {
    /// Parse the `mime;base64,data` shape. Malformed shape, an unexpected
    /// declared type, an encoded body already over the size cap, or
    /// undecodable base64 all reject the payload.
    pub fn parse(raw: &str, limits: &UploadLimits) -> Result<Self, AppError> {
        let raw = raw.strip_prefix("data:").unwrap_or(raw);

        let (mime, body) = raw.split_once(";base64,").ok_or_else(|| {
            AppError::InvalidEncoding("expected `mime;base64,data` shape".to_string())
        })?;

        let declared_mime = mime.trim().to_ascii_lowercase();
        if !ACCEPTED_DECLARED_TYPES.contains(&declared_mime.as_str()) {
            return Err(AppError::UnsupportedFormat {
                format: declared_mime,
            });
        }

        let body = body.trim();

        // Base64 inflates by 4/3, so the decoded size is known from the
        // encoded length and padding alone. Oversized payloads are
        // rejected here, before any decode buffer is allocated.
        let padding = body.bytes().rev().take_while(|&b| b == b'=').count();
        let decoded_estimate = (body.len() / 4 * 3).saturating_sub(padding);
        if decoded_estimate > limits.max_file_size_bytes {
            return Err(AppError::TooLarge {
                size: decoded_estimate,
                max: limits.max_file_size_bytes,
            });
        }

        let data = BASE64
            .decode(body)
            .map_err(|e| AppError::InvalidEncoding(format!("base64 decode failed: {}", e)))?;

        Ok(Self {
            declared_mime,
            data,
        })
    }
}
