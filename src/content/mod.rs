//! Content module - reading, front-matter splitting and markdown rendering

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod record;
mod store;

pub use error::{ContentError, Result};
pub use frontmatter::{FrontMatter, MatterFormat};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use record::{ContentRecord, Metadata};
pub use store::ContentStore;
