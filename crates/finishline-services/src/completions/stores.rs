//! Persistence traits for completion mutations.
//!
//! Narrow contracts over the backing store; implementations live outside
//! this crate (the in-memory backend in [`crate::memory`] is the reference
//! implementation used by tests).

use async_trait::async_trait;
use uuid::Uuid;

use finishline_core::models::{CompletionImage, CompletionUpdate};
use finishline_core::AppError;

#[async_trait]
pub trait CompletionStore: Send + Sync {
    /// Event year of a completion, `None` if it does not exist.
    async fn event_year(&self, completion_id: Uuid) -> Result<Option<i32>, AppError>;

    /// Apply an allow-listed update. Only fields present in the update are
    /// touched.
    async fn apply_update(
        &self,
        completion_id: Uuid,
        update: &CompletionUpdate,
    ) -> Result<(), AppError>;
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn images_for_completion(
        &self,
        completion_id: Uuid,
    ) -> Result<Vec<CompletionImage>, AppError>;

    async fn insert_gallery(&self, images: Vec<CompletionImage>) -> Result<(), AppError>;

    async fn set_caption(&self, image_id: Uuid, caption: Option<String>) -> Result<(), AppError>;

    async fn set_display_order(&self, image_id: Uuid, display_order: i32)
        -> Result<(), AppError>;

    async fn delete(&self, image_id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn delete(&self, comment_id: Uuid) -> Result<(), AppError>;
}
