//! Page scanning: find code blocks and attach export suggestions.
//!
//! A [`Scanner`] selects `pre` and `code` candidates, skips those already
//! processed, runs the qualifier, language detector and extension resolver
//! on the rest, and returns one [`CodeBlock`] per accepted element.
//!
//! "Already processed" lives behind [`MarkStore`] so that a host can keep it
//! in the page itself ([`AttributeMarks`]) or beside it ([`MemoryMarks`]).
//! Scanning again after the page grew only reports the new blocks.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, trace};

use crate::detect::{detect_language, qualifies_as_code_block};
use crate::dom::{ArenaDom, ArenaNodeId, ElementRef, Query, TreeNode};
use crate::error::{Error, Result};
use crate::extension::{DEFAULT_EXTENSION, resolve_extension};
use crate::extract::extract_code;
use crate::settings::{DownloadMode, Settings};

/// Elements considered as code block candidates.
pub const CANDIDATE_SELECTOR: &str = "pre, code";

/// Attribute [`AttributeMarks`] sets on processed elements.
pub const MARKER_ATTR: &str = "data-codegrab";

/// Quick extension lists longer than this start collapsed.
const QUICK_VISIBLE: usize = 5;

/// Read/write access to the "already processed" flag of elements.
pub trait MarkStore {
    fn is_marked(&self, dom: &ArenaDom, id: ArenaNodeId) -> bool;

    fn mark(&mut self, dom: &mut ArenaDom, id: ArenaNodeId);
}

/// Marks elements with the [`MARKER_ATTR`] attribute.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttributeMarks;

impl MarkStore for AttributeMarks {
    fn is_marked(&self, dom: &ArenaDom, id: ArenaNodeId) -> bool {
        dom.get_attr(id, MARKER_ATTR).is_some()
    }

    fn mark(&mut self, dom: &mut ArenaDom, id: ArenaNodeId) {
        dom.set_attr(id, MARKER_ATTR, "");
    }
}

/// Keeps processed node ids outside the DOM.
#[derive(Debug, Default, Clone)]
pub struct MemoryMarks {
    seen: HashSet<ArenaNodeId>,
}

impl MemoryMarks {
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl MarkStore for MemoryMarks {
    fn is_marked(&self, _dom: &ArenaDom, id: ArenaNodeId) -> bool {
        self.seen.contains(&id)
    }

    fn mark(&mut self, _dom: &mut ArenaDom, id: ArenaNodeId) {
        self.seen.insert(id);
    }
}

/// Export choices offered next to a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickPanel {
    /// Detected extension, omitted when it is only the plain-text default.
    pub auto_extension: Option<String>,
    pub quick_extensions: Vec<String>,
    /// Whether the quick list starts folded.
    pub collapsed: bool,
    pub download_mode: DownloadMode,
}

impl QuickPanel {
    pub fn new(extension: &str, settings: &Settings) -> Self {
        Self {
            auto_extension: (extension != DEFAULT_EXTENSION).then(|| extension.to_string()),
            quick_extensions: settings.quick_extensions.clone(),
            collapsed: settings.quick_extensions.len() > QUICK_VISIBLE,
            download_mode: settings.download_mode,
        }
    }
}

/// An accepted code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// Position in discovery order over the scanner's lifetime.
    pub index: usize,
    pub node: ArenaNodeId,
    /// `pre` or `code`.
    pub tag: String,
    pub text: String,
    /// Detected language label; empty when unknown.
    pub language: String,
    pub extension: String,
    pub panel: QuickPanel,
}

/// Finds and describes code blocks in a page.
pub struct Scanner {
    candidates: Query,
    settings: Settings,
    found: usize,
}

impl Scanner {
    pub fn new(settings: Settings) -> Result<Self> {
        Ok(Self {
            candidates: Query::parse(CANDIDATE_SELECTOR)?,
            settings,
            found: 0,
        })
    }

    /// Scan the whole document.
    pub fn scan(&mut self, dom: &mut ArenaDom, marks: &mut impl MarkStore) -> Vec<CodeBlock> {
        let root = dom.document();
        self.scan_subtree(dom, root, marks)
    }

    /// Scan `root` and its descendants, e.g. a subtree that was just inserted.
    pub fn scan_subtree(
        &mut self,
        dom: &mut ArenaDom,
        root: ArenaNodeId,
        marks: &mut impl MarkStore,
    ) -> Vec<CodeBlock> {
        let candidates = self.candidates.select(dom, root);
        let total = candidates.len();
        let mut blocks = Vec::new();

        for id in candidates {
            if marks.is_marked(dom, id) || inside_marked(dom, id, marks) {
                trace!(node = id.0, "already processed");
                continue;
            }

            let elem = ElementRef::new(dom, id);
            if !qualifies_as_code_block(&elem) {
                trace!(node = id.0, tag = elem.tag(), "not a code block");
                continue;
            }

            let tag = elem.tag().to_string();
            let language = block_language(&elem);
            let extension = resolve_extension(&language);
            let text = extract_code(dom, id);
            trace!(node = id.0, %tag, %language, %extension, "code block");

            marks.mark(dom, id);
            blocks.push(CodeBlock {
                index: self.found,
                node: id,
                tag,
                text,
                panel: QuickPanel::new(&extension, &self.settings),
                language,
                extension,
            });
            self.found += 1;
        }

        debug!(candidates = total, blocks = blocks.len(), "scanned");
        blocks
    }
}

/// Language of an accepted block. A `pre` accepted with a `code` inside
/// takes its hints from that `code`, whose own classes rank highest.
fn block_language(elem: &ElementRef<'_>) -> String {
    match elem.descendants().find(|d| d.is_tag("code")) {
        Some(code) if elem.is_tag("pre") => detect_language(&code),
        _ => detect_language(elem),
    }
}

fn inside_marked(dom: &ArenaDom, id: ArenaNodeId, marks: &impl MarkStore) -> bool {
    let mut current = dom.get(id).map_or(ArenaNodeId::NONE, |n| n.parent);
    while let Some(node) = dom.get(current) {
        if marks.is_marked(dom, current) {
            return true;
        }
        current = node.parent;
    }
    false
}

/// Scan a freshly parsed page once.
pub fn scan_page(dom: &mut ArenaDom, settings: &Settings) -> Result<Vec<CodeBlock>> {
    let mut scanner = Scanner::new(settings.clone())?;
    Ok(scanner.scan(dom, &mut MemoryMarks::default()))
}

/// Look up a block by index.
pub fn find_block(blocks: &[CodeBlock], index: usize) -> Result<&CodeBlock> {
    blocks
        .iter()
        .find(|b| b.index == index)
        .ok_or(Error::BlockNotFound {
            index,
            count: blocks.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_pre_code_yields_one_block() {
        let mut dom = parse_html(r#"<pre><code class="language-rust">fn main(){}</code></pre>"#);
        let blocks = scan_page(&mut dom, &Settings::default()).unwrap();

        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert_eq!(block.tag, "code");
        assert_eq!(block.language, "rust");
        assert_eq!(block.extension, ".rs");
        assert_eq!(block.text, "fn main(){}");
        assert_eq!(block.panel.auto_extension.as_deref(), Some(".rs"));
    }

    #[test]
    fn test_pre_accepted_on_class_hides_inner_code() {
        let mut dom = parse_html(r#"<pre><code class="code-block">x = 1</code></pre>"#);
        let blocks = scan_page(&mut dom, &Settings::default()).unwrap();

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].tag, "pre");
    }

    #[test]
    fn test_pre_accepted_on_class_reads_inner_code_language() {
        let mut dom = parse_html(
            r#"<div><pre><code class="language-python"><span class="code-line">print(1)</span></code></pre></div>"#,
        );
        let blocks = scan_page(&mut dom, &Settings::default()).unwrap();

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].tag, "pre");
        assert_eq!(blocks[0].language, "python");
        assert_eq!(blocks[0].extension, ".py");
        assert_eq!(blocks[0].text, "print(1)");
    }

    #[test]
    fn test_pre_accepted_on_class_falls_back_to_pre_hints() {
        let mut dom = parse_html(
            r#"<div><pre data-lang="go"><code><span class="code-line">package main</span></code></pre></div>"#,
        );
        let blocks = scan_page(&mut dom, &Settings::default()).unwrap();

        assert_eq!(blocks[0].tag, "pre");
        assert_eq!(blocks[0].language, "go");
    }

    #[test]
    fn test_unknown_language_panel() {
        let mut dom = parse_html("<div><pre><code>x</code></pre></div>");
        let blocks = scan_page(&mut dom, &Settings::default()).unwrap();

        assert_eq!(blocks[0].language, "");
        assert_eq!(blocks[0].extension, ".txt");
        assert_eq!(blocks[0].panel.auto_extension, None);
        assert!(!blocks[0].panel.collapsed);
    }

    #[test]
    fn test_collapsed_quick_list() {
        let settings = Settings {
            quick_extensions: [".a", ".b", ".c", ".d", ".e", ".f"]
                .into_iter()
                .map(String::from)
                .collect(),
            ..Settings::default()
        };
        let panel = QuickPanel::new(".rs", &settings);
        assert!(panel.collapsed);
        assert_eq!(panel.quick_extensions.len(), 6);
    }

    #[test]
    fn test_attribute_marks_written_to_dom() {
        let mut dom = parse_html("<pre><code>x</code></pre>");
        let mut scanner = Scanner::new(Settings::default()).unwrap();
        let mut marks = AttributeMarks;

        let blocks = scanner.scan(&mut dom, &mut marks);
        assert_eq!(blocks.len(), 1);
        assert_eq!(dom.get_attr(blocks[0].node, MARKER_ATTR), Some(""));

        assert!(scanner.scan(&mut dom, &mut marks).is_empty());
    }

    #[test]
    fn test_find_block() {
        let mut dom = parse_html("<pre><code>a</code></pre><div><pre><code>b</code></pre></div>");
        let blocks = scan_page(&mut dom, &Settings::default()).unwrap();

        assert_eq!(find_block(&blocks, 1).unwrap().text, "b");
        assert!(matches!(
            find_block(&blocks, 7),
            Err(Error::BlockNotFound { index: 7, count: 2 })
        ));
    }
}
