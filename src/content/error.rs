//! Error types for the content pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading, splitting, rendering or highlighting content
#[derive(Error, Debug)]
pub enum ContentError {
    /// The slug does not name a readable file in the content root
    #[error("content not found for slug '{slug}' ({path:?})")]
    NotFound {
        slug: String,
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Front matter could not be parsed
    #[error("front matter parse error ({format}): {message}")]
    Parse { format: &'static str, message: String },

    /// The highlighter does not accept this language
    #[error("unsupported highlighting language: {0}")]
    UnsupportedLanguage(String),

    /// The highlighter failed on otherwise supported input
    #[error("highlighting failed: {0}")]
    Highlight(String),

    /// Invalid renderer or highlighter configuration
    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContentError {
    pub(crate) fn not_found(
        slug: &str,
        path: impl Into<PathBuf>,
        source: Option<std::io::Error>,
    ) -> Self {
        Self::NotFound {
            slug: slug.to_string(),
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(format: &'static str, message: impl ToString) -> Self {
        Self::Parse {
            format,
            message: message.to_string(),
        }
    }

    /// Whether this is a missing-content error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
