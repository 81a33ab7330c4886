//! Compiled CSS selector lists.

use cssparser::{Parser, ParserInput};
use selectors::context::{MatchingContext, SelectorCaches};
use selectors::matching::{MatchingForInvalidation, MatchingMode, NeedsSelectorFlags};
use selectors::parser::{ParseRelative, Selector, SelectorList};

use super::arena::{ArenaDom, ArenaNodeId};
use super::element_ref::{ElementRef, PageSelectors};
use crate::error::{Error, Result};

/// A parsed selector list such as `pre, code`.
#[derive(Debug, Clone)]
pub struct Query {
    selectors: Vec<Selector<PageSelectors>>,
}

impl Query {
    /// Compile a comma-separated selector list.
    pub fn parse(source: &str) -> Result<Self> {
        let mut input = ParserInput::new(source);
        let mut parser = Parser::new(&mut input);
        let list = SelectorList::parse(&PageSelectors, &mut parser, ParseRelative::No)
            .map_err(|e| Error::InvalidSelector(format!("{source}: {:?}", e.kind)))?;

        Ok(Self {
            selectors: list.slice().to_vec(),
        })
    }

    /// Whether `elem` matches any selector in the list.
    pub fn matches(&self, elem: &ElementRef<'_>) -> bool {
        let mut caches = SelectorCaches::default();
        let mut context = MatchingContext::new(
            MatchingMode::Normal,
            None,
            &mut caches,
            selectors::context::QuirksMode::NoQuirks,
            NeedsSelectorFlags::No,
            MatchingForInvalidation::No,
        );

        self.selectors.iter().any(|selector| {
            selectors::matching::matches_selector(selector, 0, None, elem, &mut context)
        })
    }

    /// Matching elements within `root` (inclusive), in document order.
    pub fn select(&self, dom: &ArenaDom, root: ArenaNodeId) -> Vec<ArenaNodeId> {
        std::iter::once(root)
            .chain(dom.descendants(root))
            .filter(|&id| ElementRef::element(dom, id).is_some_and(|e| self.matches(&e)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_selector_list_document_order() {
        let dom = parse_html("<code>a</code><pre><code>b</code></pre><p>c</p>");
        let query = Query::parse("pre, code").unwrap();

        let hits: Vec<_> = query
            .select(&dom, dom.document())
            .into_iter()
            .map(|id| dom.element_name(id).unwrap().to_string())
            .collect();
        assert_eq!(hits, ["code", "pre", "code"]);
    }

    #[test]
    fn test_attribute_and_class_selectors() {
        let dom = parse_html(
            r#"<div><span class="badge">x</span><span data-language="go">Go</span></div>"#,
        );
        let query = Query::parse("[data-language], .code-lang").unwrap();
        let div = dom.find_by_tag("div").unwrap();

        let hits = query.select(&dom, div);
        assert_eq!(hits.len(), 1);
        assert_eq!(dom.get_attr(hits[0], "data-language"), Some("go"));
    }

    #[test]
    fn test_descendant_and_child_combinators() {
        let dom = parse_html("<div><pre><code>x</code></pre></div><code>y</code>");
        let nested = Query::parse("pre > code").unwrap();
        assert_eq!(nested.select(&dom, dom.document()).len(), 1);

        let any = Query::parse("div code").unwrap();
        assert_eq!(any.select(&dom, dom.document()).len(), 1);
    }

    #[test]
    fn test_select_includes_root() {
        let dom = parse_html("<code>x</code>");
        let code = dom.find_by_tag("code").unwrap();
        let query = Query::parse("code").unwrap();
        assert_eq!(query.select(&dom, code), vec![code]);
    }

    #[test]
    fn test_invalid_selector() {
        assert!(matches!(Query::parse("pre >"), Err(Error::InvalidSelector(_))));
        assert!(matches!(Query::parse("a:hover"), Err(Error::InvalidSelector(_))));
    }
}
