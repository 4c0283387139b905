//! Render one page

use anyhow::Result;

use crate::Docsite;

/// Print the rendered content for `slug`
///
/// With `json` the full `{content, data}` record is printed; otherwise only
/// the HTML. Missing content prints the fallback, same as a page would show.
pub fn run(site: &Docsite, slug: &str, json: bool) -> Result<()> {
    let record = site.content(slug)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print!("{}", record.content);
    }

    Ok(())
}
