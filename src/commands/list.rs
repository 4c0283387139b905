//! List site content

use anyhow::Result;

use crate::Docsite;

/// Print every slug with its title
pub fn run(site: &Docsite) -> Result<()> {
    let loader = site.loader()?;
    let slugs = loader.slugs();

    println!("Pages ({}):", slugs.len());
    for slug in slugs {
        let data = loader.data(&slug);
        let title = data
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or("(untitled)");
        println!("  {} [{}]", title, slug);
    }

    Ok(())
}
