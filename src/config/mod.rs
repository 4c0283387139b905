//! Configuration module

mod site;

pub use site::HighlightConfig;
pub use site::MarkdownConfig;
pub use site::SiteConfig;
pub use site::DEFAULT_FALLBACK_HTML;
