use std::path::Path;

use crate::auth::AuthError;
use crate::source::SpecSource;

/// Errors that can occur while fetching a single source.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to fetch from URL: {0}")]
    HttpStatus(String),
}

/// Transfers one source's document to a target path.
///
/// The orchestrator derives the target path and guarantees its parent
/// directory exists; implementations only move bytes. A trait seam so
/// batches are testable without network or filesystem sources.
#[async_trait::async_trait]
pub trait SpecFetcher: Send + Sync {
    async fn fetch(&self, source: &SpecSource, target_path: &Path) -> Result<(), FetchError>;
}
