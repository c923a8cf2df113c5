//! In-memory backend for tests and development.
//!
//! One store implements every collaborator trait so a whole service stack
//! can be wired against a single fixture. The vote map is keyed by
//! (voter, completion), which gives `insert` the same atomic uniqueness
//! guarantee a database constraint provides.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use finishline_core::models::{
    Completion, CompletionImage, CompletionUpdate, Participant, PhotoComment, Vote,
};
use finishline_core::AppError;

use crate::authz::{ParticipantDirectory, ResourceOwnership};
use crate::completions::reader::{CompletionSource, ReadOutcome};
use crate::completions::stores::{CommentStore, CompletionStore, ImageStore};
use crate::votes::{VoteStore, VoteStoreError};

#[derive(Default)]
struct State {
    participants: HashMap<Uuid, Participant>,
    completions: HashMap<Uuid, Completion>,
    images: HashMap<Uuid, CompletionImage>,
    comments: HashMap<Uuid, PhotoComment>,
    votes: HashMap<(Uuid, Uuid), Vote>,
}

#[derive(Default)]
pub struct MemoryEventStore {
    state: Mutex<State>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("event store lock")
    }

    pub fn add_participant(&self, participant: Participant) {
        self.lock().participants.insert(participant.id, participant);
    }

    pub fn add_completion(&self, completion: Completion) {
        self.lock().completions.insert(completion.id, completion);
    }

    pub fn add_image(&self, image: CompletionImage) {
        self.lock().images.insert(image.id, image);
    }

    pub fn add_comment(&self, comment: PhotoComment) {
        self.lock().comments.insert(comment.id, comment);
    }

    /// Reassign a completion to another participant. Exists so tests can
    /// exercise ownership changes between two authorization calls.
    pub fn reassign_completion(&self, completion_id: Uuid, new_owner: Uuid) {
        if let Some(completion) = self.lock().completions.get_mut(&completion_id) {
            completion.participant_id = new_owner;
        }
    }

    pub fn completion(&self, completion_id: Uuid) -> Option<Completion> {
        self.lock().completions.get(&completion_id).cloned()
    }

    pub fn image(&self, image_id: Uuid) -> Option<CompletionImage> {
        self.lock().images.get(&image_id).cloned()
    }

    /// All images of a completion in display order, for test assertions.
    pub fn images_for_completion_snapshot(&self, completion_id: Uuid) -> Vec<CompletionImage> {
        let mut images: Vec<_> = self
            .lock()
            .images
            .values()
            .filter(|i| i.completion_id == completion_id)
            .cloned()
            .collect();
        images.sort_by_key(|i| i.display_order);
        images
    }

    pub fn comment_exists(&self, comment_id: Uuid) -> bool {
        self.lock().comments.contains_key(&comment_id)
    }
}

#[async_trait]
impl ParticipantDirectory for MemoryEventStore {
    async fn find_by_identity(&self, identity_id: &str) -> Result<Option<Participant>, AppError> {
        Ok(self
            .lock()
            .participants
            .values()
            .find(|p| p.identity_id.as_deref() == Some(identity_id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Participant>, AppError> {
        Ok(self.lock().participants.get(&id).cloned())
    }
}

#[async_trait]
impl ResourceOwnership for MemoryEventStore {
    async fn completion_owner(&self, completion_id: Uuid) -> Result<Option<Uuid>, AppError> {
        Ok(self
            .lock()
            .completions
            .get(&completion_id)
            .map(|c| c.participant_id))
    }

    async fn image_owner(&self, image_id: Uuid) -> Result<Option<Uuid>, AppError> {
        Ok(self.lock().images.get(&image_id).map(|i| i.participant_id))
    }

    async fn comment_owner(&self, comment_id: Uuid) -> Result<Option<Uuid>, AppError> {
        Ok(self
            .lock()
            .comments
            .get(&comment_id)
            .map(|c| c.participant_id))
    }
}

#[async_trait]
impl VoteStore for MemoryEventStore {
    async fn find(&self, voter: Uuid, completion_id: Uuid) -> Result<Option<Vote>, AppError> {
        Ok(self.lock().votes.get(&(voter, completion_id)).cloned())
    }

    async fn insert(&self, vote: Vote) -> Result<(), VoteStoreError> {
        let mut state = self.lock();
        let key = (vote.voter_participant_id, vote.completion_id);
        if state.votes.contains_key(&key) {
            return Err(VoteStoreError::DuplicateVote);
        }
        if let Some(completion) = state.completions.get_mut(&vote.completion_id) {
            completion.vote_count += 1;
        }
        state.votes.insert(key, vote);
        Ok(())
    }

    async fn delete(&self, vote_id: Uuid) -> Result<bool, AppError> {
        let mut state = self.lock();
        let Some(key) = state
            .votes
            .iter()
            .find(|(_, v)| v.id == vote_id)
            .map(|(k, _)| *k)
        else {
            return Ok(false);
        };
        let vote = state.votes.remove(&key);
        if let Some(vote) = vote {
            if let Some(completion) = state.completions.get_mut(&vote.completion_id) {
                completion.vote_count -= 1;
            }
        }
        Ok(true)
    }

    async fn count_for_completion(&self, completion_id: Uuid) -> Result<i64, AppError> {
        Ok(self
            .lock()
            .votes
            .keys()
            .filter(|(_, c)| *c == completion_id)
            .count() as i64)
    }
}

#[async_trait]
impl CompletionStore for MemoryEventStore {
    async fn event_year(&self, completion_id: Uuid) -> Result<Option<i32>, AppError> {
        Ok(self
            .lock()
            .completions
            .get(&completion_id)
            .map(|c| c.event_year))
    }

    async fn apply_update(
        &self,
        completion_id: Uuid,
        update: &CompletionUpdate,
    ) -> Result<(), AppError> {
        let mut state = self.lock();
        let completion = state
            .completions
            .get_mut(&completion_id)
            .ok_or_else(|| AppError::NotFound("Completion not found".to_string()))?;

        if let Some(completed_on) = update.completed_on {
            completion.completed_on = completed_on;
        }
        if let Some(duration) = &update.duration {
            completion.duration = duration.clone();
        }
        if let Some(comment) = &update.comment {
            completion.comment = comment.clone();
        }
        Ok(())
    }
}

#[async_trait]
impl ImageStore for MemoryEventStore {
    async fn images_for_completion(
        &self,
        completion_id: Uuid,
    ) -> Result<Vec<CompletionImage>, AppError> {
        Ok(self.images_for_completion_snapshot(completion_id))
    }

    async fn insert_gallery(&self, images: Vec<CompletionImage>) -> Result<(), AppError> {
        let mut state = self.lock();
        for image in images {
            if let Some(completion) = state.completions.get_mut(&image.completion_id) {
                completion.image_count += 1;
            }
            state.images.insert(image.id, image);
        }
        Ok(())
    }

    async fn set_caption(&self, image_id: Uuid, caption: Option<String>) -> Result<(), AppError> {
        self.lock()
            .images
            .get_mut(&image_id)
            .map(|i| i.caption = caption)
            .ok_or_else(|| AppError::NotFound("Image not found".to_string()))
    }

    async fn set_display_order(
        &self,
        image_id: Uuid,
        display_order: i32,
    ) -> Result<(), AppError> {
        self.lock()
            .images
            .get_mut(&image_id)
            .map(|i| i.display_order = display_order)
            .ok_or_else(|| AppError::NotFound("Image not found".to_string()))
    }

    async fn delete(&self, image_id: Uuid) -> Result<(), AppError> {
        let mut state = self.lock();
        let image = state
            .images
            .remove(&image_id)
            .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;
        if let Some(completion) = state.completions.get_mut(&image.completion_id) {
            completion.image_count -= 1;
        }
        Ok(())
    }
}

#[async_trait]
impl CommentStore for MemoryEventStore {
    async fn delete(&self, comment_id: Uuid) -> Result<(), AppError> {
        let mut state = self.lock();
        let comment = state
            .comments
            .remove(&comment_id)
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;
        if let Some(completion) = state.completions.get_mut(&comment.completion_id) {
            completion.comment_count -= 1;
        }
        Ok(())
    }
}

#[async_trait]
impl CompletionSource for MemoryEventStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn fetch(&self, completion_id: Uuid) -> Result<ReadOutcome<Completion>, AppError> {
        Ok(match self.lock().completions.get(&completion_id) {
            Some(completion) => ReadOutcome::Found(completion.clone()),
            None => ReadOutcome::NotFound,
        })
    }
}
