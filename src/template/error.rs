//! Error types for template compilation and execution.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template source is malformed or nests too deeply.
    #[error("template: {name}: {message}")]
    Compile { name: String, message: String },

    /// The template compiled but failed while running against the data.
    #[error("template: {name}: executing: {message}")]
    Exec { name: String, message: String },
}

pub type Result<T> = std::result::Result<T, TemplateError>;
