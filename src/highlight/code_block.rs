//! Code block component

use super::Highlighter;
use crate::helpers::{code_fence, encode, inline_code};

/// A block of source code shown on a page, with an optional file name header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub code: String,
    /// Highlighting language; the highlighter's default when `None`
    pub language: Option<String>,
    pub filename: Option<String>,
}

impl CodeBlock {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: None,
            filename: None,
        }
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Render the component as HTML
    pub fn render(&self, highlighter: &Highlighter) -> String {
        let lang = self
            .language
            .as_deref()
            .unwrap_or_else(|| highlighter.default_language());
        let body = highlighter.highlight_or_plain(&self.code, lang);

        match &self.filename {
            Some(filename) => format!(
                r#"<div class="code-block"><div class="code-block-filename">{}</div><div class="code-block-body">{}</div></div>"#,
                encode(filename),
                body
            ),
            None => format!(
                r#"<div class="code-block"><div class="code-block-body">{}</div></div>"#,
                body
            ),
        }
    }

    /// Render the block back to markdown, fenced so the code cannot break out
    pub fn to_markdown(&self) -> String {
        let fence = code_fence(&self.code, self.language.as_deref());
        match &self.filename {
            Some(filename) => format!("{}\n\n{}", inline_code(filename), fence),
            None => fence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HighlightConfig;

    #[test]
    fn test_render_with_filename() {
        let highlighter = Highlighter::new(&HighlightConfig::default());
        let html = CodeBlock::new("import graphbit\n")
            .language("python")
            .filename("agent<1>.py")
            .render(&highlighter);

        assert!(html.starts_with(r#"<div class="code-block">"#));
        assert!(html.contains(r#"<div class="code-block-filename">agent&lt;1&gt;.py</div>"#));
        assert!(html.contains("<pre style="));
    }

    #[test]
    fn test_render_uses_default_language() {
        let highlighter = Highlighter::new(&HighlightConfig::default());
        let html = CodeBlock::new("const a = 1;\n").render(&highlighter);
        assert!(!html.contains("code-block-filename"));
        assert!(html.contains("<pre style="));
    }

    #[test]
    fn test_render_unsupported_language_is_escaped() {
        let highlighter = Highlighter::new(&HighlightConfig::default());
        let html = CodeBlock::new("<b>").language("brainfuck").render(&highlighter);
        assert!(html.contains(r#"<code class="language-brainfuck">&lt;b&gt;</code>"#));
    }

    #[test]
    fn test_to_markdown() {
        let block = CodeBlock::new("```\nnested\n```").language("markdown");
        assert_eq!(block.to_markdown(), "````markdown\n```\nnested\n```\n````\n");

        let named = CodeBlock::new("x = 1").language("python").filename("a.py");
        assert_eq!(named.to_markdown(), "`a.py`\n\n```python\nx = 1\n```\n");
    }
}
