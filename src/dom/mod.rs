//! Page DOM: parsing, navigation and selector queries.
//!
//! Pages are parsed with html5ever into an [`ArenaDom`]. Detection rules see
//! elements only through the [`TreeNode`] trait; [`ElementRef`] is its arena
//! implementation and also the element type for `selectors` matching.

mod arena;
mod element_ref;
mod node;
mod query;
mod tree_sink;

pub use arena::{ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, Attribute};
pub use element_ref::{ElementRef, PageSelectors};
pub use node::TreeNode;
pub use query::Query;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::ArenaSink;

/// Parse an HTML document.
pub fn parse_html(html: &str) -> ArenaDom {
    parse_document(ArenaSink::new(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

/// Parse raw page bytes, detecting the character encoding first.
pub fn parse_html_bytes(bytes: &[u8]) -> ArenaDom {
    let hint = crate::util::sniff_charset(bytes);
    let html = crate::util::decode_text(bytes, hint);
    parse_html(&html)
}

/// Trimmed text of the document's `<title>`, if any.
pub fn page_title(dom: &ArenaDom) -> Option<String> {
    let title = dom.find_by_tag("title")?;
    let text = dom.text(title);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_title() {
        let dom = parse_html("<html><head><title>  Rust Guide </title></head><body></body></html>");
        assert_eq!(page_title(&dom).as_deref(), Some("Rust Guide"));

        let dom = parse_html("<p>no title</p>");
        assert_eq!(page_title(&dom), None);
    }

    #[test]
    fn test_parse_bytes_windows_1252() {
        // 0x93/0x94 are curly quotes in Windows-1252 and invalid as UTF-8.
        let bytes = b"<meta charset=\"windows-1252\"><pre>\x93hi\x94</pre>";
        let dom = parse_html_bytes(bytes);
        let pre = dom.find_by_tag("pre").unwrap();
        assert_eq!(dom.text(pre), "\u{201c}hi\u{201d}");
    }
}
