//! HTML encoding helpers

use std::borrow::Cow;

/// Named reference for one of the four characters that are unsafe in HTML text
fn reference_for(c: char) -> Option<&'static str> {
    match c {
        '"' => Some("&quot;"),
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    }
}

/// Encode the dangerous HTML characters (`"`, `&`, `<`, `>`)
///
/// Returns the input untouched (borrowed) when it contains none of them.
///
/// # Examples
/// ```
/// use docsite::helpers::encode;
/// assert_eq!(encode("a < b"), "a &lt; b");
/// assert_eq!(encode("plain"), "plain");
/// ```
pub fn encode(s: &str) -> Cow<'_, str> {
    let Some(first) = s.find(['"', '&', '<', '>']) else {
        return Cow::Borrowed(s);
    };

    let mut result = String::with_capacity(s.len() + 16);
    result.push_str(&s[..first]);
    for c in s[first..].chars() {
        match reference_for(c) {
            Some(reference) => result.push_str(reference),
            None => result.push(c),
        }
    }

    Cow::Owned(result)
}

/// Wrap already highlighted or escaped code in a `<pre><code>` block
pub fn pre_code(inner: &str, lang: Option<&str>) -> String {
    match lang {
        Some(lang) if !lang.is_empty() => format!(
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            encode(lang),
            inner
        ),
        _ => format!("<pre><code>{}</code></pre>", inner),
    }
}
