//! # codegrab
//!
//! Find code blocks in web pages, guess their language, and export them.
//!
//! ## Features
//!
//! - Decide whether a `pre`/`code` element is a real code block
//! - Detect the language from classes, data attributes and nearby labels
//! - Map language labels to file extensions
//! - Copy as text or Markdown, or save as a named file
//!
//! ## Quick Start
//!
//! ```
//! use codegrab::dom::parse_html;
//! use codegrab::scan::scan_page;
//! use codegrab::settings::Settings;
//!
//! let mut dom = parse_html(r#"
//!     <div class="example">
//!       <span class="code-lang">TypeScript</span>
//!       <pre><code>const x: number = 1;</code></pre>
//!     </div>"#);
//!
//! let blocks = scan_page(&mut dom, &Settings::default())?;
//! assert_eq!(blocks.len(), 1);
//! assert_eq!(blocks[0].language, "typescript");
//! assert_eq!(blocks[0].extension, ".ts");
//! # Ok::<(), codegrab::Error>(())
//! ```
//!
//! ## Working with single elements
//!
//! The detection functions take any [`dom::TreeNode`]:
//!
//! ```
//! use codegrab::dom::{parse_html, ElementRef};
//! use codegrab::{detect_language, qualifies_as_code_block, resolve_extension};
//!
//! let dom = parse_html(r#"<pre><code class="language-go">package main</code></pre>"#);
//! let code = ElementRef::new(&dom, dom.find_by_tag("code").unwrap());
//!
//! assert!(qualifies_as_code_block(&code));
//! assert_eq!(resolve_extension(&detect_language(&code)), ".go");
//! ```

pub mod detect;
pub mod dom;
pub mod error;
pub mod export;
pub mod extension;
pub mod extract;
pub mod filename;
pub mod markdown;
pub mod scan;
pub mod settings;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use detect::{detect_language, qualifies_as_code_block};
pub use error::{Error, Result};
pub use extension::resolve_extension;
pub use export::{Export, ExportAction};
pub use scan::{CodeBlock, MarkStore, QuickPanel, Scanner};
pub use settings::Settings;
