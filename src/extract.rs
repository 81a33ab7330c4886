//! Code text extraction.

use crate::dom::{ArenaDom, ArenaNodeData, ArenaNodeId};

/// Class a host puts on UI it inserts into a code block (buttons, badges).
/// Anything under such an element is not part of the code.
pub const INJECTED_CLASS: &str = "codegrab-injected";

/// Text of the block at `id`, without injected UI.
pub fn extract_code(dom: &ArenaDom, id: ArenaNodeId) -> String {
    let mut out = String::new();
    let mut stack = vec![id];

    while let Some(current) = stack.pop() {
        let Some(node) = dom.get(current) else {
            continue;
        };
        match &node.data {
            ArenaNodeData::Text(text) => out.push_str(text),
            ArenaNodeData::Element { classes, .. } if classes.iter().any(|c| c == INJECTED_CLASS) => {}
            ArenaNodeData::Element { .. } | ArenaNodeData::Document => {
                let mark = stack.len();
                stack.extend(dom.children(current));
                stack[mark..].reverse();
            }
            ArenaNodeData::Comment(_) | ArenaNodeData::Doctype(_) => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_extract_highlighted() {
        let dom = parse_html(
            r#"<pre><code><span class="k">let</span> x <span class="o">=</span> 1;</code></pre>"#,
        );
        let code = dom.find_by_tag("code").unwrap();
        assert_eq!(extract_code(&dom, code), "let x = 1;");
    }

    #[test]
    fn test_extract_skips_injected_ui() {
        let dom = parse_html(
            r#"<pre><button class="codegrab-injected">Copy</button><code>ls -la</code><!-- c --></pre>"#,
        );
        let pre = dom.find_by_tag("pre").unwrap();
        assert_eq!(extract_code(&dom, pre), "ls -la");
    }

    #[test]
    fn test_extract_keeps_whitespace() {
        let dom = parse_html("<pre><code>def f():\n    return 1\n</code></pre>");
        let code = dom.find_by_tag("code").unwrap();
        assert_eq!(extract_code(&dom, code), "def f():\n    return 1\n");
    }
}
