//! Highlight a source file as a code block

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::highlight::{CodeBlock, Highlighter};
use crate::Docsite;

/// Build the code block for `path`, guessing the language from its extension
pub fn code_block(path: &Path, lang: Option<&str>) -> Result<CodeBlock> {
    let code =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

    let mut block = CodeBlock::new(code);
    if let Some(lang) = lang.or_else(|| path.extension().and_then(|e| e.to_str())) {
        block = block.language(lang);
    }
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        block = block.filename(name);
    }

    Ok(block)
}

/// Print `path` as highlighted HTML, or as fenced markdown
pub fn run(site: &Docsite, path: &Path, lang: Option<&str>, markdown: bool) -> Result<()> {
    let block = code_block(path, lang)?;

    if markdown {
        print!("{}", block.to_markdown());
    } else {
        let highlighter = Highlighter::instance(&site.config.highlight);
        println!("{}", block.render(&highlighter));
    }

    Ok(())
}
