use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::text::strip_html;

/// A comment on a completion's photo gallery. Ownership-checked on delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoComment {
    pub id: Uuid,
    pub completion_id: Uuid,
    pub participant_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client input for creating a comment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewComment {
    pub completion_id: Uuid,
    #[validate(length(min = 1, max = 1000))]
    pub body: String,
}

impl NewComment {
    /// Comment bodies are stored HTML-stripped.
    pub fn sanitized_body(&self) -> String {
        strip_html(&self.body)
    }
}
