//! On-disk document access.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::path::PathComponents;
use super::resolve::{resolve_bytes, ResolveError};

/// The JSON file served by this instance.
///
/// Every call reads the file again; there is no consistency between two
/// reads beyond "what was on disk at the time".
#[derive(Debug, Clone)]
pub struct DocumentSource {
    path: PathBuf,
}

impl DocumentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw document bytes.
    pub async fn read(&self) -> Result<Vec<u8>, ResolveError> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(bytes)
    }

    /// Read the document and resolve `components` against it.
    pub async fn resolve(&self, components: &PathComponents) -> Result<Value, ResolveError> {
        tracing::debug!(
            file = %self.path.display(),
            keys = %components,
            "Reading document"
        );
        let bytes = self.read().await?;
        resolve_bytes(components, &bytes)
    }
}
