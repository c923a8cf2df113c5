//! Ordered two-stage completion reads.
//!
//! A read consults named source strategies in order (e.g. a denormalized
//! view first, the base table second). Each source returns a typed outcome:
//! the chain falls through only on `NotFound`. A source error is fatal for
//! the request; it is never treated as a signal to silently degrade to the
//! next source.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use finishline_core::models::Completion;
use finishline_core::AppError;

/// Typed outcome of one source lookup.
#[derive(Debug)]
pub enum ReadOutcome<T> {
    Found(T),
    NotFound,
}

/// One named read strategy.
#[async_trait]
pub trait CompletionSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch(&self, completion_id: Uuid) -> Result<ReadOutcome<Completion>, AppError>;
}

/// Reads a completion through an ordered list of sources.
#[derive(Clone)]
pub struct CompletionReader {
    sources: Vec<Arc<dyn CompletionSource>>,
}

impl CompletionReader {
    pub fn new(sources: Vec<Arc<dyn CompletionSource>>) -> Self {
        Self { sources }
    }

    pub async fn read(&self, completion_id: Uuid) -> Result<Completion, AppError> {
        for source in &self.sources {
            match source.fetch(completion_id).await {
                Ok(ReadOutcome::Found(completion)) => {
                    tracing::debug!(
                        source = source.name(),
                        completion_id = %completion_id,
                        "Completion read"
                    );
                    return Ok(completion);
                }
                Ok(ReadOutcome::NotFound) => continue,
                Err(e) => {
                    tracing::error!(
                        source = source.name(),
                        completion_id = %completion_id,
                        error = %e,
                        "Completion source failed"
                    );
                    return Err(e);
                }
            }
        }
        Err(AppError::NotFound("Completion not found".to_string()))
    }
}
