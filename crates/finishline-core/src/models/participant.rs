use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered participant for one event year.
///
/// At most one participant exists per (external identity, event year), and
/// bib numbers are unique within an event year. `identity_id` stays `None`
/// until the auth callback links an external identity to the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub identity_id: Option<String>,
    pub email: String,
    pub display_name: String,
    pub bib_number: Option<i32>,
    pub completed: bool,
    pub event_year: i32,
    pub registered_at: DateTime<Utc>,
}

impl Participant {
    pub fn is_linked(&self) -> bool {
        self.identity_id.is_some()
    }
}
