//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain. Each sub-module represents a specific feature area.

mod comment;
mod completion;
mod participant;
mod vote;

// Re-export all models for convenient imports
pub use comment::*;
pub use completion::*;
pub use participant::*;
pub use vote::*;
