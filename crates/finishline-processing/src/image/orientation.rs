//! EXIF orientation handling.
//!
//! Phone cameras record rotation as an EXIF tag instead of rotating pixels.
//! The sanitizer applies the tag physically so the stored image is upright
//! even after all metadata is stripped.

use std::io::Cursor;

use image::{imageops, DynamicImage};

/// Read the EXIF orientation tag (1-8) from raw image bytes.
/// Returns 1 (normal) when there is no EXIF data or the tag is absent.
pub fn read_orientation(data: &[u8]) -> u8 {
    let mut cursor = Cursor::new(data);
    let Ok(exif) = exif::Reader::new().read_from_container(&mut cursor) else {
        return 1;
    };
    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .and_then(|v| u8::try_from(v).ok())
        .filter(|v| (1..=8).contains(v))
        .unwrap_or(1)
}

/// Get rotation and flip operations needed for a given EXIF orientation
/// Returns (rotate_angle, flip_horizontal, flip_vertical)
pub fn orientation_transforms(orientation: u8) -> (Option<u16>, bool, bool) {
    match orientation {
        1 => (None, false, false),      // Normal
        2 => (None, true, false),       // Mirror horizontal
        3 => (Some(180), false, false), // Rotate 180
        4 => (None, false, true),       // Mirror vertical
        5 => (Some(270), true, false),  // Mirror horizontal + Rotate 270 CW
        6 => (Some(90), false, false),  // Rotate 90 CW
        7 => (Some(90), true, false),   // Mirror horizontal + Rotate 90 CW
        8 => (Some(270), false, false), // Rotate 270 CW
        _ => (None, false, false),      // Invalid, treat as normal
    }
}

/// Physically rotate/flip pixel data to make the image upright.
pub fn apply_orientation(mut img: DynamicImage, orientation: u8) -> DynamicImage {
    let (rotate, flip_h, flip_v) = orientation_transforms(orientation);

    if let Some(angle) = rotate {
        img = match angle {
            90 => DynamicImage::ImageRgba8(imageops::rotate90(&img.to_rgba8())),
            180 => DynamicImage::ImageRgba8(imageops::rotate180(&img.to_rgba8())),
            270 => DynamicImage::ImageRgba8(imageops::rotate270(&img.to_rgba8())),
            _ => img,
        };
    }
    if flip_h {
        img = DynamicImage::ImageRgba8(imageops::flip_horizontal(&img.to_rgba8()));
    }
    if flip_v {
        img = DynamicImage::ImageRgba8(imageops::flip_vertical(&img.to_rgba8()));
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    #[test]
    fn test_orientation_transforms_all_values() {
        for orientation in 1..=8 {
            let (rotate, _flip_h, _flip_v) = orientation_transforms(orientation);
            if let Some(angle) = rotate {
                assert!([90, 180, 270].contains(&angle));
            }
        }
    }

    #[test]
    fn test_orientation_transforms_invalid() {
        for orientation in [0u8, 9, 255] {
            assert_eq!(orientation_transforms(orientation), (None, false, false));
        }
    }

    #[test]
    fn test_apply_orientation_swaps_dimensions() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 2, Rgba([0, 0, 255, 255])));

        // Orientations 5-8 involve a 90/270 rotation, swapping dimensions
        for orientation in [5u8, 6, 7, 8] {
            let oriented = apply_orientation(img.clone(), orientation);
            assert_eq!(oriented.dimensions(), (2, 4));
        }

        // 1-4 keep dimensions
        for orientation in [1u8, 2, 3, 4] {
            let oriented = apply_orientation(img.clone(), orientation);
            assert_eq!(oriented.dimensions(), (4, 2));
        }
    }

    #[test]
    fn test_read_orientation_no_exif() {
        assert_eq!(read_orientation(b"no exif here"), 1);
    }
}
