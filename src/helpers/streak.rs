//! Delimiter sizing for generated markdown

/// Length of the longest run of adjacent, non-overlapping `needle`s in `text`
///
/// # Examples
/// ```
/// use docsite::helpers::longest_run;
/// assert_eq!(longest_run("aaa-aa-a", "a"), 3);
/// assert_eq!(longest_run("abc", "z"), 0);
/// ```
pub fn longest_run(text: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }

    let mut max = 0;
    let mut count = 0;
    let mut expected = None;

    for (index, _) in text.match_indices(needle) {
        if expected == Some(index) {
            count += 1;
        } else {
            count = 1;
        }
        max = max.max(count);
        expected = Some(index + needle.len());
    }

    max
}

/// Number of backticks needed to fence `code` safely (at least `minimum`)
fn fence_width(code: &str, minimum: usize) -> usize {
    (longest_run(code, "`") + 1).max(minimum)
}

/// Wrap `code` in a fenced markdown code block
pub fn code_fence(code: &str, lang: Option<&str>) -> String {
    let fence = "`".repeat(fence_width(code, 3));
    let mut block = String::with_capacity(code.len() + fence.len() * 2 + 16);
    block.push_str(&fence);
    block.push_str(lang.unwrap_or_default());
    block.push('\n');
    block.push_str(code);
    if !code.ends_with('\n') {
        block.push('\n');
    }
    block.push_str(&fence);
    block.push('\n');
    block
}

/// Wrap `text` in an inline code span
pub fn inline_code(text: &str) -> String {
    let fence = "`".repeat(fence_width(text, 1));
    // Padding keeps a leading or trailing backtick from merging with the fence
    if text.starts_with('`') || text.ends_with('`') {
        format!("{} {} {}", fence, text, fence)
    } else {
        format!("{}{}{}", fence, text, fence)
    }
}
