//! Rendered content handed to the page assembler

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Front-matter metadata, in the order the keys were written
pub type Metadata = IndexMap<String, serde_json::Value>;

/// A rendered markdown document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Rendered HTML
    pub content: String,

    /// Front-matter fields, passed through without a schema
    pub data: Metadata,
}

impl ContentRecord {
    pub fn new(content: String, data: Metadata) -> Self {
        Self { content, data }
    }

    /// The record returned when content cannot be produced
    pub fn fallback(html: &str) -> Self {
        Self {
            content: html.to_string(),
            data: Metadata::new(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.data.get("title").and_then(|v| v.as_str())
    }

    pub fn description(&self) -> Option<&str> {
        self.data.get("description").and_then(|v| v.as_str())
    }
}
