//! Implements ContentPort from a JSON fixture file.
//!
//! Layout: `{ "chunks": [...], "moments": [...], "tasks": [...] }`; every
//! section is optional and defaults to empty.

use crate::domain::{CollaborationMoment, ContentChunk, DomainError, Task};
use crate::ports::ContentPort;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ContentFixture {
    #[serde(default)]
    pub chunks: Vec<ContentChunk>,
    #[serde(default)]
    pub moments: Vec<CollaborationMoment>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// JSON file-based content source.
pub struct JsonContent {
    path: PathBuf,
    cache: tokio::sync::RwLock<ContentFixture>,
}

impl JsonContent {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: tokio::sync::RwLock::new(ContentFixture::default()),
        }
    }

    /// Read and parse the fixture. Call after construction or when the file changes.
    pub async fn load(&self) -> Result<(), DomainError> {
        let raw = fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::Content(format!("read {}: {}", self.path.display(), e))
        })?;
        let fixture: ContentFixture = serde_json::from_str(&raw).map_err(|e| {
            DomainError::Content(format!("parse {}: {}", self.path.display(), e))
        })?;
        info!(
            path = %self.path.display(),
            chunks = fixture.chunks.len(),
            moments = fixture.moments.len(),
            tasks = fixture.tasks.len(),
            "content fixture loaded"
        );
        *self.cache.write().await = fixture;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ContentPort for JsonContent {
    async fn chunks(&self) -> Result<Vec<ContentChunk>, DomainError> {
        Ok(self.cache.read().await.chunks.clone())
    }

    async fn moments(&self) -> Result<Vec<CollaborationMoment>, DomainError> {
        Ok(self.cache.read().await.moments.clone())
    }

    async fn tasks(&self) -> Result<Vec<Task>, DomainError> {
        Ok(self.cache.read().await.tasks.clone())
    }
}
