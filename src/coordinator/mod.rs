//! Per-request orchestration: wait, resolve, render.
//!
//! # Data Flow
//! ```text
//! CoreRequest::Read    → [wait_for(path)] → resolve → Outcome::Json | Outcome::Text
//! CoreRequest::Render  → [wait_for(path)] → resolve → render → Outcome::Rendered
//! CoreRequest::Trigger → trigger(path)    → Outcome::Triggered
//! anything else        → Outcome::NotSupported
//!
//! resolve NotFound     → Outcome::Missing
//! other resolve error  → Outcome::Internal
//! template error       → Outcome::TemplateFailed
//! ```
//!
//! Nothing here knows about HTTP; `http::response` maps outcomes to responses.

use std::sync::Arc;

use serde_json::Value;

use crate::notification::NotificationRegistry;
use crate::template::TemplateRenderer;
use crate::tree::{to_body, DocumentSource, PathComponents, ResolveError};

/// What a caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreRequest {
    /// Return the value at `path`.
    Read { path: String, wait: bool },
    /// Fill `template` with the value at `path`.
    Render {
        path: String,
        wait: bool,
        template: String,
    },
    /// Release everyone waiting on `path`.
    Trigger { path: String },
    /// A method this server does not handle.
    Unsupported { method: String },
}

impl CoreRequest {
    /// The raw request path, used as the wait/trigger key.
    pub fn path(&self) -> Option<&str> {
        match self {
            CoreRequest::Read { path, .. }
            | CoreRequest::Render { path, .. }
            | CoreRequest::Trigger { path } => Some(path),
            CoreRequest::Unsupported { .. } => None,
        }
    }
}

/// Transport-neutral result of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Pretty-printed JSON for a sub-tree or non-string leaf.
    Json(String),
    /// A bare string leaf, unquoted.
    Text(String),
    /// Template output.
    Rendered(String),
    /// The path did not resolve.
    Missing,
    /// The document could not be read or parsed; carries the error text.
    Internal(String),
    /// The template failed to compile or execute; carries the error text.
    TemplateFailed(String),
    /// A trigger was processed.
    Triggered,
    NotSupported,
}

/// Runs requests against one document and one notification registry.
#[derive(Debug, Clone)]
pub struct RequestCoordinator {
    document: DocumentSource,
    registry: Arc<NotificationRegistry>,
    renderer: TemplateRenderer,
}

impl RequestCoordinator {
    pub fn new(document: DocumentSource, registry: Arc<NotificationRegistry>) -> Self {
        Self {
            document,
            registry,
            renderer: TemplateRenderer::default(),
        }
    }

    pub fn registry(&self) -> &Arc<NotificationRegistry> {
        &self.registry
    }

    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    pub fn document(&self) -> &DocumentSource {
        &self.document
    }

    pub async fn handle(&self, request: CoreRequest) -> Outcome {
        match request {
            CoreRequest::Read { path, wait } => match self.resolve(&path, wait).await {
                Ok(value) => read_outcome(&value),
                Err(outcome) => outcome,
            },
            CoreRequest::Render {
                path,
                wait,
                template,
            } => match self.resolve(&path, wait).await {
                Ok(value) => self.render(&path, &template, &value),
                Err(outcome) => outcome,
            },
            CoreRequest::Trigger { path } => {
                let released = self.registry.trigger(&path);
                tracing::info!(path = %path, released, "Triggered waiters");
                Outcome::Triggered
            }
            CoreRequest::Unsupported { method } => {
                tracing::debug!(method = %method, "Unsupported method");
                Outcome::NotSupported
            }
        }
    }

    /// Optionally park on the path's gate, then resolve against the file as it is now.
    async fn resolve(&self, path: &str, wait: bool) -> Result<Value, Outcome> {
        if wait {
            self.registry.wait_for(path).await;
        }

        let components = PathComponents::parse(path);
        self.document
            .resolve(&components)
            .await
            .map_err(|e| resolve_failure(path, e))
    }

    fn render(&self, path: &str, template: &str, value: &Value) -> Outcome {
        match self.renderer.render(template, value) {
            Ok(text) => Outcome::Rendered(text),
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Template failed");
                Outcome::TemplateFailed(e.to_string())
            }
        }
    }
}

fn read_outcome(value: &Value) -> Outcome {
    match (value, to_body(value)) {
        (Value::String(_), Ok(body)) => Outcome::Text(body),
        (_, Ok(body)) => Outcome::Json(body),
        (_, Err(e)) => Outcome::Internal(e.to_string()),
    }
}

fn resolve_failure(path: &str, error: ResolveError) -> Outcome {
    match error {
        ResolveError::NotFound => {
            tracing::debug!(path = %path, "Path not found");
            Outcome::Missing
        }
        other => {
            tracing::warn!(path = %path, error = %other, "Resolution failed");
            Outcome::Internal(other.to_string())
        }
    }
}
