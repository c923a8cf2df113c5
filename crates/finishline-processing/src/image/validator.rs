//! Image validator - content-based format and dimension checks.
//!
//! The declared MIME type never reaches this module: format detection works
//! on byte signatures via `image`'s format guessing, so a spoofed or
//! mismatched declared type cannot bypass validation.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use finishline_core::{AppError, UploadLimits};

/// True image formats accepted for upload. Vector and script-bearing
/// formats (SVG in particular) can never probe as one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoFormat {
    Jpeg,
    Png,
    WebP,
}

impl PhotoFormat {
    fn from_probed(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(PhotoFormat::Jpeg),
            ImageFormat::Png => Some(PhotoFormat::Png),
            ImageFormat::WebP => Some(PhotoFormat::WebP),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PhotoFormat::Jpeg => "JPEG",
            PhotoFormat::Png => "PNG",
            PhotoFormat::WebP => "WebP",
        }
    }
}

/// Raw bytes that passed validation, with metadata extracted by the probe.
#[derive(Debug, Clone)]
pub struct ValidatedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: PhotoFormat,
}

/// Validate a decoded upload payload.
///
/// Check order matters: byte-size bounds come before any image parsing so
/// hostile input cannot burn CPU, and the dimension check reads only the
/// header so a decompression bomb is rejected before pixel decode.
pub fn validate(bytes: Vec<u8>, limits: &UploadLimits) -> Result<ValidatedImage, AppError> {
    if bytes.len() < limits.min_file_size_bytes {
        return Err(AppError::TooSmall {
            size: bytes.len(),
            min: limits.min_file_size_bytes,
        });
    }
    if bytes.len() > limits.max_file_size_bytes {
        return Err(AppError::TooLarge {
            size: bytes.len(),
            max: limits.max_file_size_bytes,
        });
    }

    let reader = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .map_err(|e| AppError::NotAnImage(format!("format probe failed: {}", e)))?;

    let probed = reader
        .format()
        .ok_or_else(|| AppError::NotAnImage("unrecognized byte signature".to_string()))?;

    let format = PhotoFormat::from_probed(probed).ok_or_else(|| AppError::UnsupportedFormat {
        format: format!("{:?}", probed),
    })?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| AppError::NotAnImage(format!("dimension probe failed: {}", e)))?;

    if width > limits.max_dimension_px || height > limits.max_dimension_px {
        return Err(AppError::DimensionExceeded {
            width,
            height,
            max: limits.max_dimension_px,
        });
    }

    tracing::debug!(
        format = format.name(),
        width,
        height,
        bytes = bytes.len(),
        "Validated image payload"
    );

    Ok(ValidatedImage {
        bytes,
        width,
        height,
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    pub(crate) fn encode_test_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([255, 0, 0, 255]),
        ));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), format).unwrap();
        buffer
    }

    fn relaxed_limits() -> UploadLimits {
        // Synthetic test images compress below the production 1KiB floor.
        UploadLimits {
            min_file_size_bytes: 8,
            ..UploadLimits::default()
        }
    }

    #[test]
    fn test_valid_png() {
        let bytes = encode_test_image(100, 100, ImageFormat::Png);
        let validated = validate(bytes, &relaxed_limits()).unwrap();
        assert_eq!(validated.width, 100);
        assert_eq!(validated.height, 100);
        assert_eq!(validated.format, PhotoFormat::Png);
    }

    #[test]
    fn test_valid_jpeg() {
        let bytes = encode_test_image(64, 48, ImageFormat::Jpeg);
        let validated = validate(bytes, &relaxed_limits()).unwrap();
        assert_eq!(validated.format, PhotoFormat::Jpeg);
        assert_eq!((validated.width, validated.height), (64, 48));
    }

    #[test]
    fn test_oversize_rejected_before_decode() {
        // 11MB of garbage against the 10MB cap: must fail on size alone,
        // never reaching the image probe.
        let bytes = vec![0u8; 11 * 1024 * 1024];
        assert!(matches!(
            validate(bytes, &UploadLimits::default()),
            Err(AppError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_undersize_rejected() {
        let bytes = vec![0u8; 16];
        assert!(matches!(
            validate(bytes, &UploadLimits::default()),
            Err(AppError::TooSmall { size: 16, .. })
        ));
    }

    #[test]
    fn test_svg_content_rejected() {
        // An SVG/script payload passed off as an image: the byte signature
        // never probes as a raster format.
        let mut svg = b"<svg xmlns=\"http://www.w3.org/2000/svg\"><script>alert(1)</script></svg>"
            .to_vec();
        svg.resize(2048, b' ');
        assert!(matches!(
            validate(svg, &UploadLimits::default()),
            Err(AppError::NotAnImage(_))
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        let mut bytes = vec![0xAAu8; 4096];
        bytes[0] = 0x00;
        assert!(matches!(
            validate(bytes, &UploadLimits::default()),
            Err(AppError::NotAnImage(_))
        ));
    }

    #[test]
    fn test_gif_content_unsupported() {
        // GIF has a real raster signature but sits outside the allow-list.
        // Header bytes are enough for the probe; no full file needed.
        let mut gif = b"GIF89a".to_vec();
        gif.resize(2048, 0);
        let mut limits = UploadLimits::default();
        limits.min_file_size_bytes = 8;
        assert!(matches!(
            validate(gif, &limits),
            Err(AppError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_dimension_exceeded() {
        let bytes = encode_test_image(600, 600, ImageFormat::Png);
        let mut limits = relaxed_limits();
        limits.max_dimension_px = 500;
        assert!(matches!(
            validate(bytes, &limits),
            Err(AppError::DimensionExceeded {
                width: 600,
                height: 600,
                ..
            })
        ));
    }
}
