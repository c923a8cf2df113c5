//! Image sanitizer - orientation fix, metadata strip, downscale, re-encode.
//!
//! Stored bytes are always the output of the trusted encoder, never the
//! attacker-controlled bytes that merely passed format sniffing. Re-encoding
//! to canonical JPEG drops EXIF/ICC/GPS data, which is a confidentiality
//! control: GPS tags in photos can leak participant location.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};
use img_parts::jpeg::Jpeg;
use img_parts::{ImageEXIF, ImageICC};

use finishline_core::{AppError, UploadLimits};

use super::orientation::{apply_orientation, read_orientation};
use super::validator::ValidatedImage;

/// Canonical sanitizer output: upright, metadata-free JPEG.
#[derive(Debug, Clone)]
pub struct SanitizedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl SanitizedImage {
    pub const CONTENT_TYPE: &'static str = "image/jpeg";
}

/// Sanitize a validated image.
///
/// 1. Apply the stored EXIF orientation to physically rotate pixels upright.
/// 2. Downscale so neither dimension exceeds `max_dimension_px`, preserving
///    aspect ratio, shrinking only.
/// 3. Re-encode to JPEG at the fixed quality and strip every remaining
///    metadata segment.
///
/// Any sub-step failure aborts the upload; no partial output is returned.
pub fn sanitize(validated: &ValidatedImage, limits: &UploadLimits) -> Result<SanitizedImage, AppError> {
    let img = ImageReader::new(Cursor::new(&validated.bytes))
        .with_guessed_format()
        .map_err(|e| AppError::SanitizationFailed(format!("re-probe failed: {}", e)))?
        .decode()
        .map_err(|e| AppError::SanitizationFailed(format!("pixel decode failed: {}", e)))?;

    let orientation = read_orientation(&validated.bytes);
    let mut img = apply_orientation(img, orientation);

    let (width, height) = img.dimensions();
    if width > limits.max_dimension_px || height > limits.max_dimension_px {
        img = img.resize(
            limits.max_dimension_px,
            limits.max_dimension_px,
            FilterType::Lanczos3,
        );
    }

    let (width, height) = img.dimensions();
    let bytes = encode_canonical_jpeg(&img, limits.output_jpeg_quality)?;

    tracing::debug!(
        orientation,
        width,
        height,
        bytes = bytes.len(),
        "Sanitized image"
    );

    Ok(SanitizedImage {
        bytes,
        width,
        height,
    })
}

/// Encode as RGB JPEG at the given quality, then drop any EXIF/ICC segments
/// the encoder may have carried over.
fn encode_canonical_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, AppError> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buffer = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(
        &mut Cursor::new(&mut buffer),
        quality,
    ))
    .map_err(|e| AppError::SanitizationFailed(format!("JPEG encode failed: {}", e)))?;

    let mut jpeg = Jpeg::from_bytes(buffer.into())
        .map_err(|e| AppError::SanitizationFailed(format!("encoder output unreadable: {}", e)))?;
    jpeg.set_exif(None);
    jpeg.set_icc_profile(None);

    Ok(jpeg.encoder().bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::validator::validate;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn encode_rgba(img: RgbaImage, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buffer), format)
            .unwrap();
        buffer
    }

    fn relaxed_limits() -> UploadLimits {
        UploadLimits {
            min_file_size_bytes: 8,
            ..UploadLimits::default()
        }
    }

    fn validated_image(width: u32, height: u32, format: ImageFormat) -> ValidatedImage {
        let img = RgbaImage::from_pixel(width, height, Rgba([12, 120, 200, 255]));
        let buffer = encode_rgba(img, format);
        validate(buffer, &relaxed_limits()).unwrap()
    }

    /// Minimal TIFF blob carrying only the orientation tag, for embedding
    /// into a JPEG APP1 segment.
    fn exif_orientation_payload(orientation: u16) -> Vec<u8> {
        let mut tiff = vec![0x49, 0x49, 0x2a, 0x00, 0x08, 0x00, 0x00, 0x00];
        tiff.extend_from_slice(&1u16.to_le_bytes()); // one IFD entry
        tiff.extend_from_slice(&0x0112u16.to_le_bytes()); // Orientation
        tiff.extend_from_slice(&3u16.to_le_bytes()); // SHORT
        tiff.extend_from_slice(&1u32.to_le_bytes()); // count
        tiff.extend_from_slice(&orientation.to_le_bytes());
        tiff.extend_from_slice(&0u16.to_le_bytes()); // value padding
        tiff.extend_from_slice(&0u32.to_le_bytes()); // no next IFD
        tiff
    }

    fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([80, 80, 80, 255]));
        let buffer = encode_rgba(img, ImageFormat::Jpeg);
        let mut jpeg = Jpeg::from_bytes(buffer.into()).unwrap();
        jpeg.set_exif(Some(exif_orientation_payload(orientation).into()));
        jpeg.encoder().bytes().to_vec()
    }

    #[test]
    fn test_sanitize_produces_jpeg() {
        let validated = validated_image(100, 80, ImageFormat::Png);
        let sanitized = sanitize(&validated, &relaxed_limits()).unwrap();
        assert_eq!(&sanitized.bytes[..2], &[0xFF, 0xD8]); // JPEG SOI
        assert_eq!((sanitized.width, sanitized.height), (100, 80));
    }

    #[test]
    fn test_sanitize_never_upscales() {
        let validated = validated_image(100, 50, ImageFormat::Png);
        let sanitized = sanitize(&validated, &relaxed_limits()).unwrap();
        assert_eq!((sanitized.width, sanitized.height), (100, 50));
    }

    #[test]
    fn test_sanitize_downscales_preserving_aspect() {
        let validated = validated_image(600, 300, ImageFormat::Png);
        let mut limits = relaxed_limits();
        limits.max_dimension_px = 256;
        // Construct bypasses the validator's dimension gate on purpose:
        // the sanitizer enforces the canonical bound on its own.
        let sanitized = sanitize(&validated, &limits).unwrap();
        assert_eq!((sanitized.width, sanitized.height), (256, 128));
    }

    #[test]
    fn test_sanitize_applies_orientation() {
        let bytes = jpeg_with_orientation(100, 50, 6);
        assert_eq!(read_orientation(&bytes), 6);

        let validated = validate(bytes, &relaxed_limits()).unwrap();
        let sanitized = sanitize(&validated, &relaxed_limits()).unwrap();
        // Orientation 6 is a 90deg CW rotation: dimensions swap.
        assert_eq!((sanitized.width, sanitized.height), (50, 100));
    }

    #[test]
    fn test_sanitize_strips_metadata() {
        let bytes = jpeg_with_orientation(100, 50, 6);
        let validated = validate(bytes, &relaxed_limits()).unwrap();
        let sanitized = sanitize(&validated, &relaxed_limits()).unwrap();

        assert_eq!(read_orientation(&sanitized.bytes), 1);
        let jpeg = Jpeg::from_bytes(sanitized.bytes.into()).unwrap();
        assert!(jpeg.exif().is_none());
        assert!(jpeg.icc_profile().is_none());
    }

    #[test]
    fn test_sanitize_twice_both_outputs_metadata_free() {
        let bytes = jpeg_with_orientation(64, 64, 3);
        let validated = validate(bytes, &relaxed_limits()).unwrap();
        let first = sanitize(&validated, &relaxed_limits()).unwrap();
        let second = sanitize(&validated, &relaxed_limits()).unwrap();
        for out in [&first, &second] {
            assert_eq!(read_orientation(&out.bytes), 1);
        }
    }

    #[test]
    fn test_sanitize_corrupt_body_fails_cleanly() {
        // Valid PNG header, truncated body: passes the header probe but
        // cannot be fully decoded.
        let good = validated_image(100, 100, ImageFormat::Png);
        let mut truncated = good.clone();
        truncated.bytes.truncate(40);
        assert!(matches!(
            sanitize(&truncated, &relaxed_limits()),
            Err(AppError::SanitizationFailed(_))
        ));
    }
}
