//! Decide whether a `pre` or `code` element is a real code block.
//!
//! Documentation generators, blogs and forges render code in many shapes
//! (`<pre><code>`, highlighter spans, bare `<pre>`), while the same tags also
//! show up as inline keyword styling inside paragraphs or as `<pre>` used for
//! visual layout. The rules here accept the former and reject the latter.
//!
//! The two cases lean in opposite directions on ties: a `pre` with any code
//! signal is kept, an inline `code` with any prose signal is dropped.

use super::vocabulary::is_prose_tag;
use crate::dom::TreeNode;

/// Whether `node` should receive export actions.
pub fn qualifies_as_code_block<N: TreeNode>(node: &N) -> bool {
    match node.tag() {
        "pre" => qualifies_preformatted(node),
        "code" => qualifies_code(node),
        _ => false,
    }
}

fn has_code_class<N: TreeNode>(node: &N) -> bool {
    node.classes()
        .any(|class| class.to_ascii_lowercase().contains("code"))
}

fn qualifies_preformatted<N: TreeNode>(pre: &N) -> bool {
    let mut nested_code = false;
    let mut styling_span = false;
    let mut prose = false;

    for desc in pre.descendants() {
        // Highlighters tag their output with code-ish classes; that settles it.
        if has_code_class(&desc) {
            return true;
        }
        match desc.tag() {
            "code" => nested_code = true,
            "span" => styling_span = true,
            tag if is_prose_tag(tag) => prose = true,
            _ => {}
        }
    }

    // The inner code element is a candidate of its own.
    if nested_code {
        return false;
    }

    styling_span && !prose
}

fn qualifies_code<N: TreeNode>(code: &N) -> bool {
    let Some(parent) = code.parent() else {
        return false;
    };

    // Several code siblings: inline references scattered through text.
    if parent.children().filter(|c| c.is_tag("code")).count() > 1 {
        return false;
    }

    if is_prose_tag(parent.tag()) {
        return false;
    }

    // The parent carries text beyond this element.
    if code.text().trim() != parent.text().trim() {
        return false;
    }

    !code.children().any(|c| is_prose_tag(c.tag()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ArenaDom, ElementRef, parse_html};

    fn first<'a>(dom: &'a ArenaDom, tag: &str) -> ElementRef<'a> {
        ElementRef::new(dom, dom.find_by_tag(tag).expect("tag present"))
    }

    #[test]
    fn test_pre_code_pair() {
        let dom = parse_html(r#"<pre><code class="language-rust">fn main(){}</code></pre>"#);
        assert!(!qualifies_as_code_block(&first(&dom, "pre")));
        assert!(qualifies_as_code_block(&first(&dom, "code")));
    }

    #[test]
    fn test_pre_with_code_class_descendant_wins() {
        let dom = parse_html(
            r#"<pre><code class="hljs"><span class="CodeLine">let x = 1;</span></code></pre>"#,
        );
        assert!(qualifies_as_code_block(&first(&dom, "pre")));
    }

    #[test]
    fn test_pre_with_spans_only() {
        let dom = parse_html(r#"<pre><span class="k">def</span> <span class="nf">f</span>():</pre>"#);
        assert!(qualifies_as_code_block(&first(&dom, "pre")));
    }

    #[test]
    fn test_pre_with_spans_and_prose() {
        let dom = parse_html(r#"<pre><span>Dear reader,</span> <a href="/x">link</a></pre>"#);
        assert!(!qualifies_as_code_block(&first(&dom, "pre")));
    }

    #[test]
    fn test_bare_pre_is_rejected() {
        let dom = parse_html("<pre>  a   poem\n  laid out</pre>");
        assert!(!qualifies_as_code_block(&first(&dom, "pre")));
    }

    #[test]
    fn test_inline_code_in_paragraph() {
        let dom = parse_html("<p>Use the <code>foo()</code> function.</p>");
        assert!(!qualifies_as_code_block(&first(&dom, "code")));
    }

    #[test]
    fn test_code_under_prose_parent_even_when_alone() {
        for tag in ["h2", "strong", "a", "b"] {
            let dom = parse_html(&format!("<div><{tag}><code>x</code></{tag}></div>"));
            assert!(!qualifies_as_code_block(&first(&dom, "code")), "{tag}");
        }
        let dom = parse_html("<table><tr><td><code>x</code></td></tr></table>");
        assert!(!qualifies_as_code_block(&first(&dom, "code")));
    }

    #[test]
    fn test_code_with_code_siblings() {
        let dom = parse_html("<div><code>a</code><code>b</code></div>");
        assert!(!qualifies_as_code_block(&first(&dom, "code")));
    }

    #[test]
    fn test_code_parent_has_extra_text() {
        let dom = parse_html("<div>Run <code>make</code></div>");
        assert!(!qualifies_as_code_block(&first(&dom, "code")));

        let dom = parse_html("<div>\n  <code>make</code>\n</div>");
        assert!(qualifies_as_code_block(&first(&dom, "code")));
    }

    #[test]
    fn test_code_with_prose_child() {
        let dom = parse_html("<div><code><strong>Note</strong></code></div>");
        assert!(!qualifies_as_code_block(&first(&dom, "code")));
    }

    #[test]
    fn test_other_tags() {
        let dom = parse_html("<div><span>x</span></div>");
        assert!(!qualifies_as_code_block(&first(&dom, "span")));
        assert!(!qualifies_as_code_block(&first(&dom, "div")));
    }

    #[test]
    fn test_detached_code_has_no_parent() {
        let mut dom = ArenaDom::new();
        let code = dom.create_html_element("code", &[]);
        assert!(!qualifies_as_code_block(&ElementRef::new(&dom, code)));
    }
}
