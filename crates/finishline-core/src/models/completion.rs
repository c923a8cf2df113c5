use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::validation::text::strip_html;

/// A participant's record of having finished the event in a given year.
/// One per participant per event year; counts are denormalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    pub id: Uuid,
    pub participant_id: Uuid,
    pub event_year: i32,
    pub completed_on: NaiveDate,
    pub duration: Option<String>,
    pub comment: Option<String>,
    pub vote_count: i64,
    pub comment_count: i64,
    pub image_count: i64,
    pub created_at: DateTime<Utc>,
}

/// A photo attached to a completion. At any committed state exactly one
/// image of a completion has `starred = true` (the cover photo), and
/// `display_order` values form a total order with no duplicate ranks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionImage {
    pub id: Uuid,
    pub completion_id: Uuid,
    pub participant_id: Uuid,
    pub event_year: i32,
    pub storage_url: String,
    pub starred: bool,
    pub display_order: i32,
    pub caption: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// Client input for creating a completion.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompletionDraft {
    pub event_year: i32,
    pub completed_on: NaiveDate,
    #[validate(length(max = 50))]
    pub duration: Option<String>,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

impl CompletionDraft {
    /// Check the completion date invariant: inside the event year and not in
    /// the future. `today` is injected so the check stays pure.
    pub fn validate_date(&self, today: NaiveDate) -> Result<(), AppError> {
        if self.completed_on.year() != self.event_year {
            return Err(AppError::InvalidInput(format!(
                "Completion date {} is outside event year {}",
                self.completed_on, self.event_year
            )));
        }
        if self.completed_on > today {
            return Err(AppError::InvalidInput(
                "Completion date cannot be in the future".to_string(),
            ));
        }
        Ok(())
    }

    /// Comment text is stored HTML-stripped.
    pub fn sanitized_comment(&self) -> Option<String> {
        self.comment.as_deref().map(strip_html).filter(|c| !c.is_empty())
    }
}

/// Allow-listed update for a completion. Built field-by-field from validated
/// input; raw client maps are never merged into a persistence call.
#[derive(Debug, Clone, Default)]
pub struct CompletionUpdate {
    pub completed_on: Option<NaiveDate>,
    pub duration: Option<Option<String>>,
    pub comment: Option<Option<String>>,
}

impl CompletionUpdate {
    pub fn is_empty(&self) -> bool {
        self.completed_on.is_none() && self.duration.is_none() && self.comment.is_none()
    }
}

/// Allow-listed caption update for one completion image.
#[derive(Debug, Clone)]
pub struct ImageCaptionUpdate {
    pub image_id: Uuid,
    pub caption: Option<String>,
}
