//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum CliError {
    /// Source file not found
    #[error("Source file not found: {path}")]
    SourceNotFound { path: String },

    /// Source parsing error
    #[error("Failed to parse source: {message}")]
    SourceParse { message: String },

    /// Generation error
    #[error("Generation failed: {message}")]
    Generation { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error wrapper
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

#[allow(dead_code)]
impl CliError {
    pub fn source_not_found(path: impl Into<String>) -> Self {
        Self::SourceNotFound { path: path.into() }
    }

    pub fn source_parse(message: impl Into<String>) -> Self {
        Self::SourceParse {
            message: message.into(),
        }
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }
}
