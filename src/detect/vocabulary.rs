//! Fixed word lists shared by the qualifier and the language detector.

/// Short language names recognized as bare class tokens or badge text.
pub const LANGUAGE_WORDS: &[&str] = &[
    "js",
    "javascript",
    "ts",
    "typescript",
    "python",
    "py",
    "html",
    "css",
    "json",
    "bash",
    "sh",
    "rust",
    "go",
    "java",
    "cpp",
    "c",
    "ruby",
    "php",
    "sql",
    "yaml",
    "yml",
    "xml",
    "markdown",
    "md",
    "dockerfile",
];

/// Prose tags that rule an element out as a code block.
const PROSE_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "b", "strong", "td", "th", "a",
];

/// Tags that mark a document-structure boundary for the language walk.
const BOUNDARY_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "article", "section", "nav", "aside", "li",
];

/// Exact, lowercase match against [`LANGUAGE_WORDS`].
pub fn vocabulary_word(candidate: &str) -> Option<&'static str> {
    LANGUAGE_WORDS.iter().copied().find(|w| *w == candidate)
}

pub fn is_prose_tag(tag: &str) -> bool {
    PROSE_TAGS.contains(&tag)
}

pub fn is_boundary_tag(tag: &str) -> bool {
    BOUNDARY_TAGS.contains(&tag)
}
