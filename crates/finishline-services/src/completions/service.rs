//! Ownership-gated completion mutations.

use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use uuid::Uuid;

use finishline_core::models::{CompletionImage, CompletionUpdate, ImageCaptionUpdate};
use finishline_core::validation::gallery::{normalize_display_order, CandidateImage};
use finishline_core::{strip_html, validate_gallery, AppError, UploadLimits};

use crate::authz::{Authorizer, Identity, ResourceRef};
use crate::completions::stores::{CommentStore, CompletionStore, ImageStore};

/// A photo proposed for a completion's gallery: the stored object plus the
/// user-controlled presentation fields.
#[derive(Debug, Clone)]
pub struct GalleryPhotoDraft {
    pub storage_url: String,
    pub byte_size: u64,
    pub starred: bool,
    pub caption: Option<String>,
    pub display_order: i32,
}

#[derive(Clone)]
pub struct CompletionService {
    authorizer: Authorizer,
    completions: Arc<dyn CompletionStore>,
    images: Arc<dyn ImageStore>,
    comments: Arc<dyn CommentStore>,
    limits: UploadLimits,
}

impl CompletionService {
    pub fn new(
        authorizer: Authorizer,
        completions: Arc<dyn CompletionStore>,
        images: Arc<dyn ImageStore>,
        comments: Arc<dyn CommentStore>,
        limits: UploadLimits,
    ) -> Self {
        Self {
            authorizer,
            completions,
            images,
            comments,
            limits,
        }
    }

    /// Update a completion from validated input. The update struct is
    /// allow-listed field-by-field; raw client input never reaches the
    /// store.
    pub async fn update_completion(
        &self,
        identity: Option<&Identity>,
        completion_id: Uuid,
        mut update: CompletionUpdate,
        today: NaiveDate,
    ) -> Result<(), AppError> {
        self.authorizer
            .authorize_mutation(identity, ResourceRef::Completion(completion_id))
            .await?;

        if update.is_empty() {
            return Ok(());
        }

        if let Some(completed_on) = update.completed_on {
            let event_year = self
                .completions
                .event_year(completion_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Completion not found".to_string()))?;
            if completed_on.year() != event_year {
                return Err(AppError::InvalidInput(format!(
                    "Completion date {} is outside event year {}",
                    completed_on, event_year
                )));
            }
            if completed_on > today {
                return Err(AppError::InvalidInput(
                    "Completion date cannot be in the future".to_string(),
                ));
            }
        }

        // Comment text is stored HTML-stripped.
        if let Some(Some(comment)) = &update.comment {
            let stripped = strip_html(comment);
            update.comment = Some(if stripped.is_empty() {
                None
            } else {
                Some(stripped)
            });
        }

        self.completions.apply_update(completion_id, &update).await
    }

    /// Delete a comment the caller owns.
    pub async fn delete_comment(
        &self,
        identity: Option<&Identity>,
        comment_id: Uuid,
    ) -> Result<(), AppError> {
        self.authorizer
            .authorize_mutation(identity, ResourceRef::Comment(comment_id))
            .await?;
        self.comments.delete(comment_id).await
    }

    /// Delete a gallery photo the caller owns.
    pub async fn delete_image(
        &self,
        identity: Option<&Identity>,
        image_id: Uuid,
    ) -> Result<(), AppError> {
        self.authorizer
            .authorize_mutation(identity, ResourceRef::Image(image_id))
            .await?;
        self.images.delete(image_id).await
    }

    /// Set or clear a photo caption, bounded by the caption limit after
    /// trimming.
    pub async fn set_image_caption(
        &self,
        identity: Option<&Identity>,
        update: ImageCaptionUpdate,
    ) -> Result<(), AppError> {
        self.authorizer
            .authorize_mutation(identity, ResourceRef::Image(update.image_id))
            .await?;

        let caption = match update.caption {
            None => None,
            Some(raw) => {
                let trimmed = raw.trim().to_string();
                let length = trimmed.chars().count();
                if length > self.limits.max_caption_chars {
                    return Err(AppError::CaptionTooLong {
                        length,
                        max: self.limits.max_caption_chars,
                    });
                }
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed)
                }
            }
        };

        self.images.set_caption(update.image_id, caption).await
    }

    /// Re-rank a completion's images to the proposed order. The proposed
    /// ids must be exactly the completion's current image set; ranks are
    /// assigned densely so no duplicates can be committed.
    pub async fn reorder_images(
        &self,
        identity: Option<&Identity>,
        completion_id: Uuid,
        ordered_ids: &[Uuid],
    ) -> Result<(), AppError> {
        self.authorizer
            .authorize_mutation(identity, ResourceRef::Completion(completion_id))
            .await?;

        let existing = self.images.images_for_completion(completion_id).await?;
        if existing.len() != ordered_ids.len() {
            return Err(AppError::InvalidInput(
                "Proposed order must include every image exactly once".to_string(),
            ));
        }
        for image in &existing {
            if !ordered_ids.contains(&image.id) {
                return Err(AppError::InvalidInput(
                    "Proposed order must include every image exactly once".to_string(),
                ));
            }
        }

        for (rank, image_id) in ordered_ids.iter().enumerate() {
            self.images
                .set_display_order(*image_id, rank as i32)
                .await?;
        }
        Ok(())
    }

    /// Attach a validated gallery to a completion the caller owns. The
    /// aggregate invariants gate the persistence call.
    ///
    /// The gallery is attached as a whole: a completion that already has
    /// images rejects further attaches, otherwise a second attach could
    /// commit a state with two starred images or breach the count and
    /// total-size bounds. Changing an existing gallery goes through the
    /// per-image operations instead.
    pub async fn attach_gallery(
        &self,
        identity: Option<&Identity>,
        completion_id: Uuid,
        drafts: Vec<GalleryPhotoDraft>,
        uploaded_at: DateTime<Utc>,
    ) -> Result<Vec<CompletionImage>, AppError> {
        let owner = self
            .authorizer
            .authorize_mutation(identity, ResourceRef::Completion(completion_id))
            .await?;

        let existing = self.images.images_for_completion(completion_id).await?;
        if !existing.is_empty() {
            return Err(AppError::InvalidInput(
                "Completion already has photos attached".to_string(),
            ));
        }

        let mut candidates: Vec<CandidateImage> = drafts
            .iter()
            .map(|d| CandidateImage {
                byte_size: d.byte_size,
                starred: d.starred,
                caption: d.caption.clone(),
                display_order: d.display_order,
            })
            .collect();

        validate_gallery(&candidates, &self.limits)?;
        normalize_display_order(&mut candidates);

        // Candidates were stably re-ranked; map ranks back onto the drafts
        // in the same sorted order.
        let mut indexed: Vec<usize> = (0..drafts.len()).collect();
        indexed.sort_by_key(|&i| drafts[i].display_order);

        let images: Vec<CompletionImage> = indexed
            .into_iter()
            .zip(candidates.iter())
            .map(|(draft_idx, candidate)| {
                let draft = &drafts[draft_idx];
                CompletionImage {
                    id: Uuid::new_v4(),
                    completion_id,
                    participant_id: owner.participant_id,
                    event_year: owner.event_year,
                    storage_url: draft.storage_url.clone(),
                    starred: draft.starred,
                    display_order: candidate.display_order,
                    caption: candidate
                        .caption
                        .as_deref()
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(String::from),
                    uploaded_at,
                }
            })
            .collect();

        self.images.insert_gallery(images.clone()).await?;

        tracing::info!(
            completion_id = %completion_id,
            participant_id = %owner.participant_id,
            count = images.len(),
            "Gallery attached"
        );

        Ok(images)
    }
}
