//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Placeholder returned to the page when content cannot be produced
pub const DEFAULT_FALLBACK_HTML: &str = "<p>Content not found.</p>";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,

    // Content
    /// Directory holding `<slug>.<extension>` files, relative to the base dir
    pub content_dir: String,
    pub extension: String,
    pub fallback_html: String,

    #[serde(default)]
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Docs".to_string(),
            content_dir: "src/content".to_string(),
            extension: "md".to_string(),
            fallback_html: DEFAULT_FALLBACK_HTML.to_string(),
            markdown: MarkdownConfig::default(),
            highlight: HighlightConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded config from {:?}", path.as_ref());
        Ok(config)
    }
}

/// Markdown rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Optional syntax extensions; plain CommonMark when empty
    pub extensions: Vec<String>,
    /// Drop raw HTML embedded in markdown
    pub sanitize: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: Vec::new(),
            sanitize: true,
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Highlight fenced code blocks while rendering markdown
    pub enable: bool,
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
    pub default_language: String,
    /// Languages the highlighter accepts; anything else falls back to plain text
    pub languages: Vec<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: false,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
            default_language: "typescript".to_string(),
            languages: [
                "javascript",
                "typescript",
                "python",
                "json",
                "bash",
                "yaml",
                "markdown",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}
