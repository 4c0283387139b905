//! Markdown rendering

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

use super::error::{ContentError, Result};
use crate::config::{HighlightConfig, MarkdownConfig};
use crate::helpers::{encode, pre_code};
use crate::highlight::Highlighter;

/// Markdown to HTML renderer
///
/// Rendering is a single pass over the parser's event stream and keeps no
/// state between calls.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
    sanitize: bool,
    highlight: Option<HighlightConfig>,
}

impl MarkdownRenderer {
    /// Plain CommonMark renderer that drops raw HTML
    pub fn new() -> Self {
        Self {
            options: Options::empty(),
            sanitize: true,
            highlight: None,
        }
    }

    /// Build a renderer from site configuration
    pub fn from_config(markdown: &MarkdownConfig, highlight: &HighlightConfig) -> Result<Self> {
        let mut options = Options::empty();
        for extension in &markdown.extensions {
            match extension.as_str() {
                "definition_lists" => options.insert(Options::ENABLE_DEFINITION_LIST),
                "footnotes" => options.insert(Options::ENABLE_FOOTNOTES),
                "gfm" => options.insert(Options::ENABLE_GFM),
                "heading_attributes" => options.insert(Options::ENABLE_HEADING_ATTRIBUTES),
                "smart_punctuation" => options.insert(Options::ENABLE_SMART_PUNCTUATION),
                "strikethrough" => options.insert(Options::ENABLE_STRIKETHROUGH),
                "tables" => options.insert(Options::ENABLE_TABLES),
                "tasklists" => options.insert(Options::ENABLE_TASKLISTS),
                other => {
                    return Err(ContentError::Config(format!(
                        "unknown markdown extension '{}'",
                        other
                    )))
                }
            }
        }

        Ok(Self {
            options,
            sanitize: markdown.sanitize,
            highlight: highlight.enable.then(|| highlight.clone()),
        })
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);

        let mut events: Vec<Event> = Vec::new();
        // Inside an intercepted code block: (language, collected text)
        let mut code_block: Option<(Option<String>, String)> = None;
        // Alt text is written by the HTML writer itself
        let mut image_depth = 0usize;

        for event in parser {
            if code_block.is_some() {
                match event {
                    Event::Text(text) => {
                        if let Some((_, code)) = code_block.as_mut() {
                            code.push_str(&text);
                        }
                    }
                    Event::End(TagEnd::CodeBlock) => {
                        if let Some((lang, code)) = code_block.take() {
                            events.push(Event::Html(CowStr::from(
                                self.highlight_block(&code, lang.as_deref()),
                            )));
                        }
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) if self.highlight.is_some() => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::Html(_) | Event::InlineHtml(_) if self.sanitize => {
                    tracing::trace!("Dropped raw HTML from markdown");
                }
                Event::Start(Tag::Image { .. }) => {
                    image_depth += 1;
                    events.push(event);
                }
                Event::End(TagEnd::Image) => {
                    image_depth = image_depth.saturating_sub(1);
                    events.push(event);
                }
                Event::Text(text) if image_depth == 0 => {
                    events.push(Event::Html(CowStr::from(encode(&text).into_owned())));
                }
                Event::Code(code) if image_depth == 0 => {
                    events.push(Event::Html(CowStr::from(format!(
                        "<code>{}</code>",
                        encode(&code)
                    ))));
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, events.into_iter());

        html_output
    }

    /// Highlight one fenced code block, falling back to escaped plain text
    fn highlight_block(&self, code: &str, lang: Option<&str>) -> String {
        match (&self.highlight, lang) {
            (Some(config), Some(lang)) => {
                Highlighter::instance(config).highlight_or_plain(code, lang)
            }
            _ => pre_code(&encode(code), lang),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
