//! docsite: markdown content for documentation sites
//!
//! Markdown files in a content directory are read on demand, their front
//! matter is split off and the body is rendered to HTML. A shared syntax
//! highlighter backs the code block component.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod highlight;
pub mod server;

use anyhow::Result;
use std::path::Path;

/// A documentation site rooted at one directory
#[derive(Debug, Clone)]
pub struct Docsite {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding markdown sources
    pub content_dir: std::path::PathBuf,
}

impl Docsite {
    /// Open a site, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Open a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);

        Self {
            config,
            base_dir,
            content_dir,
        }
    }

    /// Create a content loader for this site
    pub fn loader(&self) -> Result<content::ContentLoader> {
        Ok(content::ContentLoader::new(self)?)
    }

    /// Rendered content for `slug`, or the fallback record
    pub fn content(&self, slug: &str) -> Result<content::ContentRecord> {
        Ok(self.loader()?.content(slug))
    }
}
