//! Heuristic code-block detection.
//!
//! - [`qualifier`]: is this `pre`/`code` element a real code block?
//! - [`language`]: which language label does the surrounding markup suggest?
//!
//! Both are pure functions over [`TreeNode`](crate::dom::TreeNode): they read
//! the DOM, never write it, and give the same answer for the same tree.

pub mod language;
pub mod qualifier;
pub mod vocabulary;

pub use language::{detect_language, label_from_element, label_from_text};
pub use qualifier::qualifies_as_code_block;
pub use vocabulary::LANGUAGE_WORDS;
