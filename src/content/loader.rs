//! Content loader - turns a slug into rendered content for a page

use super::error::Result;
use super::{ContentRecord, ContentStore, FrontMatter, MarkdownRenderer, Metadata};
use crate::Docsite;

/// Reads, splits and renders content on every request
///
/// Nothing is cached: each call sees the file as it is on disk at that moment.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    store: ContentStore,
    renderer: MarkdownRenderer,
    fallback_html: String,
}

impl ContentLoader {
    /// Create a loader for a site
    pub fn new(site: &Docsite) -> Result<Self> {
        let renderer =
            MarkdownRenderer::from_config(&site.config.markdown, &site.config.highlight)?;
        Ok(Self::with_parts(
            ContentStore::new(&site.content_dir, &site.config.extension),
            renderer,
            &site.config.fallback_html,
        ))
    }

    pub fn with_parts(
        store: ContentStore,
        renderer: MarkdownRenderer,
        fallback_html: &str,
    ) -> Self {
        Self {
            store,
            renderer,
            fallback_html: fallback_html.to_string(),
        }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Render the content for `slug`, propagating any failure
    pub fn try_content(&self, slug: &str) -> Result<ContentRecord> {
        let raw = self.store.read(slug)?;
        let (data, body) = FrontMatter::split(&raw)?;
        let content = self.renderer.render(body);

        tracing::debug!("Rendered {} ({} bytes of HTML)", slug, content.len());
        Ok(ContentRecord::new(content, data))
    }

    /// Render the content for `slug`, degrading to the fallback record
    pub fn content(&self, slug: &str) -> ContentRecord {
        match self.try_content(slug) {
            Ok(record) => record,
            Err(e) => {
                tracing::error!("Error reading markdown file for slug: {}: {}", slug, e);
                self.fallback()
            }
        }
    }

    /// The record pages receive when rendering fails
    pub fn fallback(&self) -> ContentRecord {
        ContentRecord::fallback(&self.fallback_html)
    }

    /// Front-matter metadata for `slug`, empty on any failure
    pub fn data(&self, slug: &str) -> Metadata {
        let result = self
            .store
            .read(slug)
            .and_then(|raw| FrontMatter::metadata(&raw));

        result.unwrap_or_else(|e| {
            tracing::error!("Error reading markdown data for slug: {}: {}", slug, e);
            Metadata::new()
        })
    }

    /// Every slug in the content directory, empty on failure
    pub fn slugs(&self) -> Vec<String> {
        self.store.slugs().unwrap_or_else(|e| {
            tracing::error!("Error reading content directory {:?}: {}", self.store.root(), e);
            Vec::new()
        })
    }
}
