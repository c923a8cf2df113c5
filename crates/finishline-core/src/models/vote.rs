use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One peer vote for a completion.
///
/// A voter holds at most one vote per completion (toggle semantics) and may
/// never vote for their own completion. The persistence layer must enforce
/// uniqueness on (voter_participant_id, completion_id) so a racing duplicate
/// insert fails atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub id: Uuid,
    pub voter_participant_id: Uuid,
    pub completion_id: Uuid,
    pub created_at: DateTime<Utc>,
}
