//! Vote toggling.
//!
//! A voter holds at most one vote per completion. Toggling reads the
//! existing vote and then deletes or inserts; the read-then-write pair is
//! not atomic, so the store's `insert` must enforce uniqueness on
//! (voter, completion) and fail a racing duplicate atomically. The toggle
//! treats that failure as "already voted, no-op", never as an error.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use finishline_core::models::Vote;
use finishline_core::AppError;

use crate::authz::{Authorizer, Identity};

/// Vote persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum VoteStoreError {
    /// The (voter, completion) pair already has a committed vote.
    #[error("duplicate vote")]
    DuplicateVote,

    #[error(transparent)]
    Backend(#[from] AppError),
}

/// Vote persistence. Implementations must back `insert` with a uniqueness
/// constraint on (voter_participant_id, completion_id).
#[async_trait]
pub trait VoteStore: Send + Sync {
    async fn find(&self, voter: Uuid, completion_id: Uuid) -> Result<Option<Vote>, AppError>;
    async fn insert(&self, vote: Vote) -> Result<(), VoteStoreError>;
    /// Returns whether a row was actually removed.
    async fn delete(&self, vote_id: Uuid) -> Result<bool, AppError>;
    async fn count_for_completion(&self, completion_id: Uuid) -> Result<i64, AppError>;
}

/// Net state after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteToggle {
    Cast,
    Withdrawn,
}

#[derive(Clone)]
pub struct VoteService {
    authorizer: Authorizer,
    votes: Arc<dyn VoteStore>,
}

impl VoteService {
    pub fn new(authorizer: Authorizer, votes: Arc<dyn VoteStore>) -> Self {
        Self { authorizer, votes }
    }

    /// Toggle the caller's vote on a completion.
    pub async fn toggle(
        &self,
        identity: Option<&Identity>,
        completion_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<VoteToggle, AppError> {
        let voter = self
            .authorizer
            .authorize_vote(identity, completion_id)
            .await?;

        if let Some(existing) = self
            .votes
            .find(voter.voter_participant_id, completion_id)
            .await?
        {
            self.votes.delete(existing.id).await?;
            tracing::debug!(
                voter = %voter.voter_participant_id,
                completion_id = %completion_id,
                "Vote withdrawn"
            );
            return Ok(VoteToggle::Withdrawn);
        }

        let vote = Vote {
            id: Uuid::new_v4(),
            voter_participant_id: voter.voter_participant_id,
            completion_id,
            created_at: now,
        };

        match self.votes.insert(vote).await {
            Ok(()) => Ok(VoteToggle::Cast),
            Err(VoteStoreError::DuplicateVote) => {
                // A concurrent toggle won the insert; the net state the
                // caller asked for is already committed.
                tracing::debug!(
                    voter = %voter.voter_participant_id,
                    completion_id = %completion_id,
                    "Concurrent vote insert, treating as already cast"
                );
                Ok(VoteToggle::Cast)
            }
            Err(VoteStoreError::Backend(e)) => Err(e),
        }
    }
}
