//! Front-matter splitting

use lazy_static::lazy_static;
use regex::Regex;

use super::error::{ContentError, Result};
use super::record::Metadata;

/// Marker that opens and closes a front-matter block
const DELIMITER: &str = "---";

lazy_static! {
    static ref COMMENT_LINE: Regex =
        Regex::new(r"(?m)^\s*#[^\n]+").expect("comment pattern is valid");
}

/// Languages a front-matter block can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatterFormat {
    Yaml,
    Json,
    Toml,
}

impl MatterFormat {
    /// Pick the format from the language tag after the opening `---`
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "" | "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            other => Err(ContentError::parse(
                "unknown",
                format!("unsupported front-matter language '{}'", other),
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }

    /// Parse a non-empty block into metadata
    fn parse(&self, block: &str) -> Result<Metadata> {
        match self {
            Self::Yaml => serde_yaml::from_str::<Option<Metadata>>(block)
                .map(Option::unwrap_or_default)
                .map_err(|e| ContentError::parse(self.name(), e)),
            Self::Json => serde_json::from_str::<Metadata>(block)
                .map_err(|e| ContentError::parse(self.name(), e)),
            Self::Toml => {
                let table: toml::Table =
                    toml::from_str(block).map_err(|e| ContentError::parse(self.name(), e))?;
                Ok(table
                    .into_iter()
                    .map(|(key, value)| (key, toml_to_json(value)))
                    .collect())
            }
        }
    }
}

/// Front-matter splitter
pub struct FrontMatter;

impl FrontMatter {
    /// Split `content` into its metadata and markdown body
    ///
    /// A block is recognized only at the very start of the text (after an
    /// optional BOM). Text without one comes back unchanged with empty
    /// metadata. An unterminated block swallows the rest of the file.
    pub fn split(content: &str) -> Result<(Metadata, &str)> {
        let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);

        let Some(rest) = content.strip_prefix(DELIMITER) else {
            return Ok((Metadata::new(), content));
        };

        // `----` is a thematic break, not a delimiter
        if rest.starts_with('-') {
            return Ok((Metadata::new(), content));
        }

        // The remainder of the opening line names the language
        let (tag, rest) = match rest.find('\n') {
            Some(pos) => (&rest[..pos], &rest[pos..]),
            None => (rest, ""),
        };
        let format = MatterFormat::from_tag(tag.trim())?;

        let close = format!("\n{}", DELIMITER);
        let (block, body) = match rest.find(&close) {
            Some(pos) => {
                let body = &rest[pos + close.len()..];
                let body = body.strip_prefix('\r').unwrap_or(body);
                let body = body.strip_prefix('\n').unwrap_or(body);
                (&rest[..pos], body)
            }
            None => (rest, ""),
        };

        if COMMENT_LINE.replace_all(block, "").trim().is_empty() {
            return Ok((Metadata::new(), body));
        }

        let metadata = format.parse(block)?;
        tracing::debug!(
            "Parsed {} front matter with {} keys",
            format.name(),
            metadata.len()
        );

        Ok((metadata, body))
    }

    /// Parse only the metadata of `content`
    pub fn metadata(content: &str) -> Result<Metadata> {
        Self::split(content).map(|(metadata, _)| metadata)
    }
}

fn toml_to_json(value: toml::Value) -> serde_json::Value {
    use serde_json::Value;

    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Agents
description: Build agents with GraphBit
order: 2
draft: false
tags:
  - agents
  - llm
---

# Agents

Body text.
"#;

        let (data, body) = FrontMatter::split(content).unwrap();
        assert_eq!(data["title"], json!("Agents"));
        assert_eq!(data["order"], json!(2));
        assert_eq!(data["draft"], json!(false));
        assert_eq!(data["tags"], json!(["agents", "llm"]));
        assert_eq!(body, "\n# Agents\n\nBody text.\n");
    }

    #[test]
    fn test_keys_keep_source_order() {
        let (data, _) = FrontMatter::split("---\nzeta: 1\nalpha: 2\n---\n").unwrap();
        let keys: Vec<_> = data.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_no_frontmatter_is_identity() {
        let content = "# Title\n\nNo metadata here.\n";
        let (data, body) = FrontMatter::split(content).unwrap();
        assert!(data.is_empty());
        assert_eq!(body, content);

        let (data, body) = FrontMatter::split("").unwrap();
        assert!(data.is_empty());
        assert_eq!(body, "");
    }

    #[test]
    fn test_marker_must_be_at_start() {
        let content = "\n---\ntitle: Late\n---\nBody";
        let (data, body) = FrontMatter::split(content).unwrap();
        assert!(data.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_four_dashes_is_not_a_delimiter() {
        let content = "----\ntitle: nope\n----\n";
        let (data, body) = FrontMatter::split(content).unwrap();
        assert!(data.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_bom_is_ignored() {
        let (data, body) = FrontMatter::split("\u{FEFF}---\ntitle: BOM\n---\nBody").unwrap();
        assert_eq!(data["title"], json!("BOM"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_crlf_line_endings() {
        let (data, body) = FrontMatter::split("---\r\ntitle: Windows\r\n---\r\nBody\r\n").unwrap();
        assert_eq!(data["title"], json!("Windows"));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_empty_and_comment_only_blocks() {
        let (data, body) = FrontMatter::split("---\n---\nBody").unwrap();
        assert!(data.is_empty());
        assert_eq!(body, "Body");

        let (data, body) = FrontMatter::split("---\n# just a note\n---\nBody").unwrap();
        assert!(data.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_unterminated_block_consumes_rest() {
        let (data, body) = FrontMatter::split("---\ntitle: Open\n").unwrap();
        assert_eq!(data["title"], json!("Open"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = FrontMatter::split("---\ntitle: [unclosed\n---\nBody").unwrap_err();
        assert!(matches!(err, ContentError::Parse { format: "yaml", .. }));
    }

    #[test]
    fn test_non_mapping_is_parse_error() {
        let err = FrontMatter::split("---\n- one\n- two\n---\nBody").unwrap_err();
        assert!(matches!(err, ContentError::Parse { .. }));
    }

    #[test]
    fn test_json_frontmatter() {
        let content = "---json\n{\"title\": \"Graphs\", \"weight\": 1.5}\n---\nBody";
        let (data, body) = FrontMatter::split(content).unwrap();
        assert_eq!(data["title"], json!("Graphs"));
        assert_eq!(data["weight"], json!(1.5));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_toml_frontmatter() {
        let content =
            "---toml\ntitle = \"Tools\"\nupdated = 2024-05-01\n[nav]\norder = 4\n---\nBody";
        let (data, body) = FrontMatter::split(content).unwrap();
        assert_eq!(data["title"], json!("Tools"));
        assert_eq!(data["updated"], json!("2024-05-01"));
        assert_eq!(data["nav"], json!({ "order": 4 }));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_unknown_language_is_parse_error() {
        let err = FrontMatter::split("---coffee\ntitle = 1\n---\n").unwrap_err();
        assert!(matches!(err, ContentError::Parse { .. }));
    }

    #[test]
    fn test_metadata_only() {
        let data = FrontMatter::metadata("---\ntitle: Only\n---\nignored").unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data["title"], json!("Only"));
    }
}
