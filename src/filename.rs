//! Download file names.

use chrono::NaiveDateTime;

/// Longest title prefix (in characters) kept in a generated name.
const MAX_TITLE_CHARS: usize = 50;

/// Characters that are unsafe in file names on common platforms.
const FORBIDDEN: &[char] = &['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Generate a base file name (no extension) from the page title and a time.
///
/// `Some("My Page")` at 2024-05-01 09:03:07 gives `My_Page_20240501_090307`;
/// without a usable title the name is `code_20240501_090307`.
pub fn base_file_name(title: Option<&str>, now: NaiveDateTime) -> String {
    let timestamp = now.format("%Y%m%d_%H%M%S");

    match title.map(sanitize_title).filter(|t| !t.is_empty()) {
        Some(title) => format!("{title}_{timestamp}"),
        None => format!("code_{timestamp}"),
    }
}

/// [`base_file_name`] at the current local time.
pub fn base_file_name_now(title: Option<&str>) -> String {
    base_file_name(title, chrono::Local::now().naive_local())
}

fn sanitize_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut in_space = false;

    for c in title.trim().chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        out.push(if FORBIDDEN.contains(&c) { '_' } else { c });
    }

    out.chars().take(MAX_TITLE_CHARS).collect()
}

/// Final file name for a download.
///
/// `input` is what the user typed; when blank, `default_base` is used. The
/// extension gains a leading dot if it lacks one, and a base that already
/// ends with it is not given a second copy.
pub fn download_file_name(input: &str, default_base: &str, extension: &str) -> String {
    let base = match input.trim() {
        "" => default_base,
        typed => typed,
    };
    let extension = if extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{extension}")
    };
    let base = base.strip_suffix(extension.as_str()).unwrap_or(base);
    format!("{base}{extension}")
}
