//! Content store - reads markdown sources from the content directory

use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use super::error::{ContentError, Result};

/// Markdown files addressed by slug under one root directory
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
    extension: String,
}

impl ContentStore {
    pub fn new<P: AsRef<Path>>(root: P, extension: &str) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a slug resolves to, or `None` when the slug could escape the root
    pub fn path_for(&self, slug: &str) -> Option<PathBuf> {
        if !is_safe_slug(slug) {
            return None;
        }
        Some(self.root.join(format!("{}.{}", slug, self.extension)))
    }

    /// Read the raw source for `slug`
    pub fn read(&self, slug: &str) -> Result<String> {
        let Some(path) = self.path_for(slug) else {
            tracing::warn!("Rejected unsafe slug: {:?}", slug);
            return Err(ContentError::not_found(slug, &self.root, None));
        };

        match fs::read_to_string(&path) {
            Ok(content) => {
                tracing::debug!("Read {} bytes from {:?}", content.len(), path);
                Ok(content)
            }
            Err(e) => Err(ContentError::not_found(slug, path, Some(e))),
        }
    }

    /// Slugs of every markdown file under the root, sorted
    ///
    /// Files in subdirectories are listed by their relative path without the
    /// extension (`guides/intro`), the same form `read` accepts.
    pub fn slugs(&self) -> Result<Vec<String>> {
        let mut slugs = Vec::new();

        for entry in WalkDir::new(&self.root).min_depth(1) {
            let entry = entry.map_err(|e| match e.into_io_error() {
                Some(io) => ContentError::Io(io),
                None => ContentError::Config("filesystem loop in content directory".to_string()),
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() || !self.has_extension(path) {
                continue;
            }
            match self.slug_for(path) {
                Some(slug) => slugs.push(slug),
                None => tracing::debug!("Skipping {:?}: not addressable by slug", path),
            }
        }

        slugs.sort();
        Ok(slugs)
    }

    /// Inverse of `path_for` for a file found under the root
    fn slug_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?.with_extension("");
        let parts = relative
            .components()
            .map(|c| match c {
                Component::Normal(part) => part.to_str(),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;
        let slug = parts.join("/");
        is_safe_slug(&slug).then_some(slug)
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e == self.extension)
            .unwrap_or(false)
    }
}

/// A slug may name nested files but never leave the root
///
/// Every `/`-separated segment must be a plain, non-empty name, so leading,
/// trailing and doubled slashes are refused along with `.` and `..`.
fn is_safe_slug(slug: &str) -> bool {
    if slug.contains('\0') || slug.contains('\\') {
        return false;
    }
    slug.split('/').all(|segment| {
        !segment.is_empty()
            && Path::new(segment)
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(files: &[(&str, &str)]) -> (tempfile::TempDir, ContentStore) {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        let store = ContentStore::new(dir.path(), "md");
        (dir, store)
    }

    #[test]
    fn test_read_existing_slug() {
        let (_dir, store) = store_with(&[("agents.md", "# Agents\n")]);
        assert_eq!(store.read("agents").unwrap(), "# Agents\n");
    }

    #[test]
    fn test_read_nested_slug() {
        let (_dir, store) = store_with(&[("guides/intro.md", "intro")]);
        assert_eq!(store.read("guides/intro").unwrap(), "intro");
    }

    #[test]
    fn test_missing_slug_is_not_found() {
        let (_dir, store) = store_with(&[]);
        let err = store.read("missing").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_slugs_are_case_sensitive() {
        let (_dir, store) = store_with(&[("Graphs.md", "g")]);
        assert!(store.read("Graphs").is_ok());
        if !store.root().join("graphs.md").exists() {
            assert!(store.read("graphs").is_err());
        }
    }

    #[test]
    fn test_traversal_is_rejected() {
        let (dir, store) = store_with(&[("inner/page.md", "inside")]);
        fs::write(dir.path().join("secret.md"), "secret").unwrap();
        let inner = ContentStore::new(dir.path().join("inner"), "md");

        assert_eq!(inner.read("page").unwrap(), "inside");
        assert!(inner.read("../secret").unwrap_err().is_not_found());
        assert!(inner.read("/etc/passwd").unwrap_err().is_not_found());
        assert!(inner.read("./page").unwrap_err().is_not_found());
        assert!(inner.read("").unwrap_err().is_not_found());
        assert!(store.path_for("a/../b").is_none());
    }

    #[test]
    fn test_empty_segments_are_rejected() {
        let (dir, store) = store_with(&[("guides/intro.md", "intro")]);
        fs::write(dir.path().join("guides/.md"), "hidden").unwrap();

        assert!(store.read("guides/").unwrap_err().is_not_found());
        assert!(store.read("guides//intro").unwrap_err().is_not_found());
        assert!(store.path_for("/guides/intro").is_none());
        assert!(store.path_for("guides/intro/").is_none());
        assert_eq!(store.read("guides/intro").unwrap(), "intro");
    }

    #[test]
    fn test_invalid_utf8_is_not_found() {
        let (dir, store) = store_with(&[]);
        fs::write(dir.path().join("binary.md"), [0xff, 0xfe, 0x00]).unwrap();
        assert!(store.read("binary").unwrap_err().is_not_found());
    }

    #[test]
    fn test_slugs_lists_markdown_files_only() {
        let (_dir, store) = store_with(&[
            ("model-providers.md", ""),
            ("agents.md", ""),
            ("notes.txt", ""),
            ("nested/deep.md", ""),
        ]);
        assert_eq!(
            store.slugs().unwrap(),
            vec!["agents", "model-providers", "nested/deep"]
        );
    }

    #[test]
    fn test_listed_nested_slugs_are_readable() {
        let (_dir, store) = store_with(&[
            ("guides/intro.md", "intro"),
            ("guides/advanced/tools.md", "tools"),
            ("index.md", "home"),
        ]);
        let slugs = store.slugs().unwrap();
        assert_eq!(slugs, vec!["guides/advanced/tools", "guides/intro", "index"]);
        for slug in &slugs {
            assert!(store.read(slug).is_ok(), "{}", slug);
        }
    }

    #[test]
    fn test_slugs_missing_root_is_error() {
        let store = ContentStore::new("/definitely/not/here", "md");
        assert!(store.slugs().is_err());
    }

    #[test]
    fn test_custom_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("page.markdown"), "x").unwrap();
        let store = ContentStore::new(dir.path(), ".markdown");
        assert_eq!(store.read("page").unwrap(), "x");
        assert_eq!(store.slugs().unwrap(), vec!["page"]);
    }
}
