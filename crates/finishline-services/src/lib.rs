//! Finishline Services Library
//!
//! Request-scoped services over the domain: the ownership authorizer that
//! gates every mutation, the vote-toggle service, and completion mutation
//! and read flows. Persistence is reached only through the collaborator
//! traits defined here; an in-memory backend is provided for tests and
//! development.

pub mod authz;
pub mod completions;
pub mod memory;
pub mod votes;

pub use authz::{Authorizer, AuthzError, Identity, ResourceRef, VerifiedOwner, VerifiedVoter};
pub use completions::{
    CompletionReader, CompletionService, CompletionSource, GalleryPhotoDraft, ReadOutcome,
};
pub use memory::MemoryEventStore;
pub use votes::{VoteService, VoteStore, VoteStoreError, VoteToggle};
