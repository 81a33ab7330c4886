//! Markdown fenced code blocks.

/// Smallest backtick fence (at least three) that no run in `content` closes.
///
/// ```
/// use codegrab::markdown::fence_length;
///
/// assert_eq!(fence_length("let x = 1;"), 3);
/// assert_eq!(fence_length("```rust\ncode\n```"), 4);
/// ```
pub fn fence_length(content: &str) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;

    for c in content.chars() {
        if c == '`' {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }

    max_run.max(2) + 1
}

/// Wrap `code` in a fenced block with `info` as the info string.
///
/// One trailing newline of `code` is absorbed by the closing fence.
///
/// ```
/// use codegrab::markdown::fence;
///
/// assert_eq!(fence("print(1)\n", "py"), "```py\nprint(1)\n```");
/// ```
pub fn fence(code: &str, info: &str) -> String {
    let body = code.strip_suffix('\n').unwrap_or(code);
    let marker = "`".repeat(fence_length(body));
    format!("{marker}{info}\n{body}\n{marker}")
}
