//! Syntax highlighting
//!
//! Loading syntect's syntax and theme sets is expensive, so one
//! [`Highlighter`] is shared by the whole process. It is created on first use
//! and can be dropped again with [`Highlighter::reset`].

mod code_block;

pub use code_block::CodeBlock;

use lazy_static::lazy_static;
use std::sync::{Arc, RwLock};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{
    highlighted_html_for_string, styled_line_to_highlighted_html, IncludeBackground,
};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::config::HighlightConfig;
use crate::content::{ContentError, Result};
use crate::helpers::{encode, pre_code};

/// Theme used when the configured one is not bundled with syntect
const FALLBACK_THEME: &str = "base16-ocean.dark";

lazy_static! {
    static ref INSTANCE: RwLock<Option<Arc<Highlighter>>> = RwLock::new(None);
}

/// Code highlighter backed by syntect
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
    theme_name: String,
    line_numbers: bool,
    default_language: String,
    /// Accepted languages; empty accepts anything syntect knows
    languages: Vec<String>,
}

impl Highlighter {
    /// Create a standalone highlighter
    pub fn new(config: &HighlightConfig) -> Self {
        let mut theme_set = ThemeSet::load_defaults();
        let (theme_name, theme) = match theme_set.themes.remove(&config.theme) {
            Some(theme) => (config.theme.clone(), theme),
            None => {
                tracing::warn!(
                    "Unknown highlight theme '{}', using {}",
                    config.theme,
                    FALLBACK_THEME
                );
                let theme = theme_set.themes.remove(FALLBACK_THEME).unwrap_or_default();
                (FALLBACK_THEME.to_string(), theme)
            }
        };

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
            theme_name,
            line_numbers: config.line_number,
            default_language: config.default_language.clone(),
            languages: config
                .languages
                .iter()
                .map(|lang| canonical_language(lang).to_string())
                .collect(),
        }
    }

    /// The process-wide highlighter, created from `config` on first use
    ///
    /// Later calls return the existing instance and ignore `config`.
    pub fn instance(config: &HighlightConfig) -> Arc<Self> {
        if let Some(existing) = read_slot().as_ref() {
            return Arc::clone(existing);
        }

        let mut slot = INSTANCE.write().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = slot.as_ref() {
            return Arc::clone(existing);
        }

        tracing::debug!("Initializing highlighter with theme {}", config.theme);
        let created = Arc::new(Self::new(config));
        *slot = Some(Arc::clone(&created));
        created
    }

    /// Drop the shared instance; returns whether one existed
    ///
    /// Callers still holding an `Arc` keep a working highlighter.
    pub fn reset() -> bool {
        let mut slot = INSTANCE.write().unwrap_or_else(|e| e.into_inner());
        slot.take().is_some()
    }

    pub fn is_initialized() -> bool {
        read_slot().is_some()
    }

    pub fn theme_name(&self) -> &str {
        &self.theme_name
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Highlight `code` as `lang`
    pub fn highlight(&self, code: &str, lang: &str) -> Result<String> {
        let syntax = self
            .syntax_for(lang)
            .ok_or_else(|| ContentError::UnsupportedLanguage(lang.to_string()))?;

        if self.line_numbers {
            self.highlight_with_line_numbers(code, syntax, lang)
        } else {
            highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme)
                .map_err(|e| ContentError::Highlight(e.to_string()))
        }
    }

    /// Highlight `code`, or return it escaped in a plain block
    pub fn highlight_or_plain(&self, code: &str, lang: &str) -> String {
        match self.highlight(code, lang) {
            Ok(html) => html,
            Err(e) => {
                tracing::debug!("Falling back to plain code block: {}", e);
                pre_code(&encode(code), Some(lang))
            }
        }
    }

    fn syntax_for(&self, lang: &str) -> Option<&SyntaxReference> {
        let lang = canonical_language(lang.trim());
        if lang.is_empty() {
            return None;
        }
        if !self.languages.is_empty() && !self.languages.iter().any(|l| l == lang) {
            return None;
        }

        self.syntax_set
            .find_syntax_by_token(syntax_token(lang))
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
    }

    fn highlight_with_line_numbers(
        &self,
        code: &str,
        syntax: &SyntaxReference,
        lang: &str,
    ) -> Result<String> {
        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut gutter = String::new();
        let mut code_lines = String::new();

        for (i, line) in LinesWithEndings::from(code).enumerate() {
            let regions = highlighter
                .highlight_line(line, &self.syntax_set)
                .map_err(|e| ContentError::Highlight(e.to_string()))?;
            let html = styled_line_to_highlighted_html(&regions, IncludeBackground::No)
                .map_err(|e| ContentError::Highlight(e.to_string()))?;

            if i > 0 {
                gutter.push('\n');
            }
            gutter.push_str(&format!(r#"<span class="line-number">{}</span>"#, i + 1));
            code_lines.push_str(&html);
        }

        Ok(format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
            encode(lang),
            gutter,
            code_lines.trim_end_matches('\n')
        ))
    }
}

fn read_slot() -> std::sync::RwLockReadGuard<'static, Option<Arc<Highlighter>>> {
    INSTANCE.read().unwrap_or_else(|e| e.into_inner())
}

/// Normalize common aliases to one language name
fn canonical_language(lang: &str) -> &str {
    match lang {
        "js" | "jsx" | "mjs" | "cjs" => "javascript",
        "ts" | "tsx" => "typescript",
        "py" => "python",
        "sh" | "shell" | "zsh" | "console" => "bash",
        "yml" => "yaml",
        "md" => "markdown",
        other => other,
    }
}

/// syntect lookup token for a canonical language name
fn syntax_token(lang: &str) -> &str {
    match lang {
        // syntect's bundled syntaxes have no TypeScript grammar
        "javascript" | "typescript" => "js",
        "python" => "py",
        "bash" => "sh",
        "markdown" => "md",
        other => other,
    }
}
