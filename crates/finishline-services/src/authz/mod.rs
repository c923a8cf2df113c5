//! Ownership authorization.
//!
//! Every mutating operation resolves the caller's identity to a participant
//! record and verifies that the target resource belongs to that participant,
//! on every request. Nothing here is cached: linkage and ownership can
//! change between requests, so both lookups are re-read each call.
//!
//! The identity is an explicit argument rather than ambient session state,
//! which keeps the authorizer testable without a real session layer.
//!
//! Existence leakage: internally `NotFound` and `Forbidden` stay distinct
//! (for logs and tests), but the public [`AppError`] conversion collapses a
//! missing resource into the same presentation as a foreign-owned one, so a
//! caller can never learn whether a resource exists by probing mutations.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use finishline_core::models::Participant;
use finishline_core::AppError;

/// An authenticated external identity, as supplied by the identity provider.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: String,
    pub email: String,
}

/// A mutable resource targeted by an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceRef {
    Completion(Uuid),
    Image(Uuid),
    Comment(Uuid),
    Profile(Uuid),
}

impl ResourceRef {
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceRef::Completion(_) => "completion",
            ResourceRef::Image(_) => "image",
            ResourceRef::Comment(_) => "comment",
            ResourceRef::Profile(_) => "profile",
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            ResourceRef::Completion(id)
            | ResourceRef::Image(id)
            | ResourceRef::Comment(id)
            | ResourceRef::Profile(id) => *id,
        }
    }
}

/// Participant lookups backed by the participant store.
#[async_trait]
pub trait ParticipantDirectory: Send + Sync {
    async fn find_by_identity(&self, identity_id: &str) -> Result<Option<Participant>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Participant>, AppError>;
}

/// Owner lookups per resource kind. `None` means the resource does not exist.
#[async_trait]
pub trait ResourceOwnership: Send + Sync {
    async fn completion_owner(&self, completion_id: Uuid) -> Result<Option<Uuid>, AppError>;
    async fn image_owner(&self, image_id: Uuid) -> Result<Option<Uuid>, AppError>;
    async fn comment_owner(&self, comment_id: Uuid) -> Result<Option<Uuid>, AppError>;
}

/// Authorization failures. Internal taxonomy; see the module docs for how
/// these surface to clients.
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    #[error("No authenticated identity")]
    Unauthenticated,

    #[error("Identity has no linked participant record")]
    NoParticipantRecord,

    #[error("{kind} {id} does not exist")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("{kind} {id} is owned by another participant")]
    Forbidden { kind: &'static str, id: Uuid },

    #[error("Voter owns the target completion")]
    SelfVoteForbidden,

    #[error(transparent)]
    Backend(#[from] AppError),
}

impl From<AuthzError> for AppError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::Unauthenticated => AppError::Unauthenticated,
            AuthzError::NoParticipantRecord => AppError::NoParticipantRecord,
            // Missing and foreign-owned resources present identically.
            AuthzError::NotFound { kind, id } | AuthzError::Forbidden { kind, id } => {
                AppError::Forbidden(format!("{} {}", kind, id))
            }
            AuthzError::SelfVoteForbidden => AppError::SelfVoteForbidden,
            AuthzError::Backend(e) => e,
        }
    }
}

/// Successful mutation check: the resolved owner, reusable by the caller to
/// avoid a second participant lookup.
#[derive(Debug, Clone)]
pub struct VerifiedOwner {
    pub participant_id: Uuid,
    pub event_year: i32,
}

/// Successful vote check.
#[derive(Debug, Clone)]
pub struct VerifiedVoter {
    pub voter_participant_id: Uuid,
    pub completion_owner_id: Uuid,
}

/// The ownership authorizer. Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct Authorizer {
    participants: Arc<dyn ParticipantDirectory>,
    resources: Arc<dyn ResourceOwnership>,
}

impl Authorizer {
    pub fn new(
        participants: Arc<dyn ParticipantDirectory>,
        resources: Arc<dyn ResourceOwnership>,
    ) -> Self {
        Self {
            participants,
            resources,
        }
    }

    async fn resolve_participant(
        &self,
        identity: Option<&Identity>,
    ) -> Result<Participant, AuthzError> {
        let identity = identity.ok_or(AuthzError::Unauthenticated)?;
        self.participants
            .find_by_identity(&identity.id)
            .await?
            .ok_or(AuthzError::NoParticipantRecord)
    }

    /// Two-step mutation check: resolve the caller to a participant, then
    /// compare against the resource's owning participant id.
    pub async fn authorize_mutation(
        &self,
        identity: Option<&Identity>,
        resource: ResourceRef,
    ) -> Result<VerifiedOwner, AuthzError> {
        let participant = self.resolve_participant(identity).await?;

        let owner = match resource {
            ResourceRef::Completion(id) => self.resources.completion_owner(id).await?,
            ResourceRef::Image(id) => self.resources.image_owner(id).await?,
            ResourceRef::Comment(id) => self.resources.comment_owner(id).await?,
            ResourceRef::Profile(id) => self.participants.find_by_id(id).await?.map(|p| p.id),
        };

        let owner_id = owner.ok_or(AuthzError::NotFound {
            kind: resource.kind(),
            id: resource.id(),
        })?;

        if owner_id != participant.id {
            tracing::debug!(
                kind = resource.kind(),
                resource_id = %resource.id(),
                caller = %participant.id,
                owner = %owner_id,
                "Ownership check failed"
            );
            return Err(AuthzError::Forbidden {
                kind: resource.kind(),
                id: resource.id(),
            });
        }

        Ok(VerifiedOwner {
            participant_id: participant.id,
            event_year: participant.event_year,
        })
    }

    /// Vote check: the voter needs a participant record and must not own the
    /// target completion.
    pub async fn authorize_vote(
        &self,
        identity: Option<&Identity>,
        completion_id: Uuid,
    ) -> Result<VerifiedVoter, AuthzError> {
        let participant = self.resolve_participant(identity).await?;

        let owner_id = self
            .resources
            .completion_owner(completion_id)
            .await?
            .ok_or(AuthzError::NotFound {
                kind: "completion",
                id: completion_id,
            })?;

        if owner_id == participant.id {
            return Err(AuthzError::SelfVoteForbidden);
        }

        Ok(VerifiedVoter {
            voter_participant_id: participant.id,
            completion_owner_id: owner_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finishline_core::ErrorMetadata;

    #[test]
    fn test_missing_and_foreign_resources_present_identically() {
        let id = Uuid::new_v4();
        let not_found: AppError = AuthzError::NotFound {
            kind: "comment",
            id,
        }
        .into();
        let forbidden: AppError = AuthzError::Forbidden {
            kind: "comment",
            id,
        }
        .into();

        assert_eq!(not_found.http_status_code(), forbidden.http_status_code());
        assert_eq!(not_found.error_code(), forbidden.error_code());
        assert_eq!(not_found.client_message(), forbidden.client_message());
    }

    #[test]
    fn test_backend_errors_pass_through() {
        let err: AppError = AuthzError::Backend(AppError::Storage("io".into())).into();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }
}
