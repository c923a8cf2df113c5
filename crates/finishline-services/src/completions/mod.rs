//! Completion mutation and read flows.
//!
//! Every mutation runs the ownership authorizer first and reaches
//! persistence only through the store traits in [`stores`]. Reads go
//! through an ordered strategy chain in [`reader`].

pub mod reader;
pub mod service;
pub mod stores;

pub use reader::{CompletionReader, CompletionSource, ReadOutcome};
pub use service::{CompletionService, GalleryPhotoDraft};
pub use stores::{CommentStore, CompletionStore, ImageStore};
