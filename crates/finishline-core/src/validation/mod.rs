//! Validation modules

pub mod gallery;
pub mod text;

pub use gallery::{normalize_display_order, validate_gallery, CandidateImage};
pub use text::strip_html;
