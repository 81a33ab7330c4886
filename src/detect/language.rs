//! Infer a code block's language from the markup around it.
//!
//! Hints usually sit on the code element or its `pre` wrapper. Site-specific
//! renderers also put them on neighbouring badges, on wrapper divs, or on a
//! label element somewhere inside the wrapper. The walk visits those places in
//! a fixed order and stops at the first label it finds. It never climbs past a
//! wrapper that sits next to headings or paragraphs, since anything above that
//! belongs to the surrounding document rather than to this block.

use super::vocabulary::{LANGUAGE_WORDS, is_boundary_tag, vocabulary_word};
use crate::dom::TreeNode;

/// Longest badge text (exclusive) considered for text inference.
const MAX_LABEL_TEXT: usize = 20;

/// Detect the language of a code element. Empty when unknown.
pub fn detect_language<N: TreeNode>(code: &N) -> String {
    walk(code).unwrap_or_default()
}

fn walk<N: TreeNode>(code: &N) -> Option<String> {
    if let Some(lang) = label_from_element(code) {
        return Some(lang);
    }

    let parent = code.parent()?;
    if let Some(lang) = label_from_element(&parent) {
        return Some(lang);
    }

    for sibling in [parent.prev_sibling(), parent.next_sibling()]
        .into_iter()
        .flatten()
    {
        if let Some(lang) = label_or_text(&sibling) {
            return Some(lang);
        }
    }

    let grandparent = parent.parent()?;
    if let Some(lang) = label_from_element(&grandparent) {
        return Some(lang);
    }

    if let Some(badge) = grandparent.descendants().find(|el| is_label_marker(el))
        && let Some(lang) = label_or_text(&badge)
    {
        return Some(lang);
    }

    if has_boundary_sibling(&grandparent) {
        return None;
    }

    label_from_element(&grandparent.parent()?)
}

/// Attribute and class hints on a single element.
pub fn label_from_element<N: TreeNode>(el: &N) -> Option<String> {
    let attr = el
        .attr("data-language")
        .filter(|v| !v.is_empty())
        .or_else(|| el.attr("data-lang").filter(|v| !v.is_empty()))
        .or_else(|| el.attr("lang").filter(|v| !v.is_empty()));
    if let Some(value) = attr {
        return Some(value.to_string());
    }

    if let Some(label) = el.classes().find_map(prefixed_label) {
        return Some(label.to_string());
    }

    el.classes()
        .find_map(|class| vocabulary_word(&class.to_lowercase()))
        .map(str::to_string)
}

/// Badge text such as `Python` or `lang: go`.
pub fn label_from_text<N: TreeNode>(el: &N) -> Option<String> {
    let text = el.text().trim().to_lowercase();
    if text.is_empty() || text.chars().count() >= MAX_LABEL_TEXT {
        return None;
    }

    let word = text
        .strip_prefix("language: ")
        .or_else(|| text.strip_prefix("lang: "))
        .unwrap_or(&text);

    LANGUAGE_WORDS
        .iter()
        .find(|w| **w == text || **w == word)
        .map(|w| w.to_string())
}

fn label_or_text<N: TreeNode>(el: &N) -> Option<String> {
    label_from_element(el).or_else(|| label_from_text(el))
}

/// `language-<x>` or `lang-<x>`, prefix matched case-insensitively.
fn prefixed_label(class: &str) -> Option<&str> {
    ["language-", "lang-"].iter().find_map(|prefix| {
        let head = class.get(..prefix.len())?;
        let rest = &class[prefix.len()..];
        (head.eq_ignore_ascii_case(prefix) && !rest.is_empty()).then_some(rest)
    })
}

fn is_label_marker<N: TreeNode>(el: &N) -> bool {
    el.attr("data-language").is_some() || el.has_class("code-lang")
}

fn has_boundary_sibling<N: TreeNode>(el: &N) -> bool {
    let Some(parent) = el.parent() else {
        return false;
    };
    parent
        .children()
        .any(|child| child != *el && is_boundary_tag(child.tag()))
}
