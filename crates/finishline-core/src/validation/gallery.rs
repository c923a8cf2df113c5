//! Multi-image completion aggregate validation.
//!
//! Pure checks over an in-memory candidate image set; gates the persistence
//! call made by the surrounding completion-creation flow but does not itself
//! persist anything.

use crate::config::UploadLimits;
use crate::error::AppError;

/// One proposed image in a completion's gallery, reduced to the fields the
/// aggregate invariants are defined over.
#[derive(Debug, Clone)]
pub struct CandidateImage {
    pub byte_size: u64,
    pub starred: bool,
    pub caption: Option<String>,
    pub display_order: i32,
}

/// Validate a proposed image set for one completion.
///
/// Invariants: count within `[min_images, max_images]`, summed byte size
/// within the gallery total, exactly one starred image, and every trimmed
/// caption within the length bound. The first violated invariant is the one
/// reported.
pub fn validate_gallery(images: &[CandidateImage], limits: &UploadLimits) -> Result<(), AppError> {
    if images.len() < limits.min_images_per_completion {
        return Err(AppError::TooFewImages {
            count: images.len(),
            min: limits.min_images_per_completion,
        });
    }
    if images.len() > limits.max_images_per_completion {
        return Err(AppError::TooManyImages {
            count: images.len(),
            max: limits.max_images_per_completion,
        });
    }

    let total: u64 = images.iter().map(|i| i.byte_size).sum();
    if total > limits.max_gallery_total_bytes {
        return Err(AppError::TotalSizeExceeded {
            total,
            max: limits.max_gallery_total_bytes,
        });
    }

    let starred = images.iter().filter(|i| i.starred).count();
    if starred == 0 {
        return Err(AppError::NoStarredImage);
    }
    if starred > 1 {
        return Err(AppError::MultipleStarredImages { count: starred });
    }

    for image in images {
        if let Some(caption) = &image.caption {
            let length = caption.trim().chars().count();
            if length > limits.max_caption_chars {
                return Err(AppError::CaptionTooLong {
                    length,
                    max: limits.max_caption_chars,
                });
            }
        }
    }

    Ok(())
}

/// Re-rank a completion's images into a dense `0..n` total order.
///
/// Input order is whatever the client proposed; ties and gaps in the
/// proposed `display_order` values are resolved by a stable sort, so the
/// result has no duplicate ranks and preserves the relative order of equals.
pub fn normalize_display_order(images: &mut [CandidateImage]) {
    images.sort_by_key(|i| i.display_order);
    for (rank, image) in images.iter_mut().enumerate() {
        image.display_order = rank as i32;
    }
}
