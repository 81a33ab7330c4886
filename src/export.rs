//! Export actions for a detected code block.
//!
//! Each action turns a [`CodeBlock`] into an [`Export`]: the text to hand to
//! a clipboard or file, plus a file name for downloads.
//!
//! # Example
//!
//! ```
//! use codegrab::dom::parse_html;
//! use codegrab::export::{ExportAction, export};
//! use codegrab::scan::scan_page;
//! use codegrab::settings::Settings;
//!
//! let mut dom = parse_html(r#"<pre><code class="language-python">print(1)</code></pre>"#);
//! let blocks = scan_page(&mut dom, &Settings::default())?;
//!
//! let out = export(&blocks[0], &ExportAction::CopyMarkdown, "code_20240101_000000");
//! assert_eq!(out.contents, "```py\nprint(1)\n```");
//! # Ok::<(), codegrab::Error>(())
//! ```

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::filename::download_file_name;
use crate::markdown::fence;
use crate::scan::CodeBlock;

/// What to do with a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ExportAction {
    /// Plain code text.
    Copy,
    /// Code wrapped in a Markdown fence tagged with the extension.
    CopyMarkdown,
    /// Save as a file.
    Download {
        /// Overrides the detected extension.
        extension: Option<String>,
        /// User-typed base name; blank means the generated default.
        #[serde(default)]
        name: String,
    },
}

/// Result of applying an [`ExportAction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Export {
    pub contents: String,
    /// Present for downloads only.
    pub file_name: Option<String>,
}

impl Export {
    /// Write the contents to any writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self.contents.as_bytes())?;
        Ok(())
    }
}

/// Apply `action` to `block`. `default_base` names downloads when the user
/// gave no name (see [`crate::filename::base_file_name`]).
pub fn export(block: &CodeBlock, action: &ExportAction, default_base: &str) -> Export {
    match action {
        ExportAction::Copy => Export {
            contents: block.text.clone(),
            file_name: None,
        },
        ExportAction::CopyMarkdown => Export {
            contents: fence(&block.text, markdown_info(&block.extension)),
            file_name: None,
        },
        ExportAction::Download { extension, name } => {
            let extension = extension.as_deref().unwrap_or(&block.extension);
            Export {
                contents: block.text.clone(),
                file_name: Some(download_file_name(name, default_base, extension)),
            }
        }
    }
}

fn markdown_info(extension: &str) -> &str {
    extension.strip_prefix('.').unwrap_or(extension)
}

/// A file name must name a single entry directly inside the output directory.
fn check_file_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single || name.contains(['/', '\\']) {
        return Err(Error::InvalidFileName(name.to_string()));
    }
    Ok(())
}

/// Write a download export into `dir`, returning the created path.
///
/// Names that would leave `dir` (`../x`, `/etc/x`, `a/b`) are rejected with
/// [`Error::InvalidFileName`].
pub fn write_export(dir: &Path, export: &Export) -> Result<PathBuf> {
    let file_name = export.file_name.as_deref().ok_or(Error::NotADownload)?;
    check_file_name(file_name)?;
    fs::create_dir_all(dir)?;

    let path = dir.join(file_name);
    let mut file = fs::File::create(&path)?;
    export.write_to(&mut file)?;

    info!(path = %path.display(), bytes = export.contents.len(), "wrote download");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ArenaNodeId;
    use crate::scan::QuickPanel;
    use crate::settings::Settings;

    fn block(text: &str, extension: &str) -> CodeBlock {
        CodeBlock {
            index: 0,
            node: ArenaNodeId(1),
            tag: "code".into(),
            text: text.into(),
            language: String::new(),
            extension: extension.into(),
            panel: QuickPanel::new(extension, &Settings::default()),
        }
    }

    #[test]
    fn test_copy() {
        let out = export(&block("ls\n", ".sh"), &ExportAction::Copy, "base");
        assert_eq!(out.contents, "ls\n");
        assert_eq!(out.file_name, None);
    }

    #[test]
    fn test_copy_markdown_uses_bare_extension() {
        let out = export(&block("ls\n", ".sh"), &ExportAction::CopyMarkdown, "base");
        assert_eq!(out.contents, "```sh\nls\n```");
    }

    #[test]
    fn test_download_default_name() {
        let action = ExportAction::Download {
            extension: None,
            name: String::new(),
        };
        let out = export(&block("x", ".rs"), &action, "code_20240101_000000");
        assert_eq!(out.file_name.as_deref(), Some("code_20240101_000000.rs"));
    }

    #[test]
    fn test_download_override_extension() {
        let action = ExportAction::Download {
            extension: Some(".txt".into()),
            name: "notes".into(),
        };
        let out = export(&block("x", ".rs"), &action, "base");
        assert_eq!(out.file_name.as_deref(), Some("notes.txt"));
    }

    #[test]
    fn test_action_json() {
        let action: ExportAction =
            serde_json::from_str(r#"{"action":"download","extension":".py"}"#).unwrap();
        assert_eq!(
            action,
            ExportAction::Download {
                extension: Some(".py".into()),
                name: String::new(),
            }
        );
    }

    #[test]
    fn test_write_export() {
        let dir = tempfile::tempdir().unwrap();
        let out = Export {
            contents: "print(1)".into(),
            file_name: Some("a.py".into()),
        };

        let path = write_export(&dir.path().join("out"), &out).unwrap();
        assert_eq!(path, dir.path().join("out").join("a.py"));
        assert_eq!(fs::read_to_string(path).unwrap(), "print(1)");
    }

    #[test]
    fn test_write_export_stays_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");

        for name in ["../escaped", "/tmp/abs", "sub/dir", "..\\win"] {
            let action = ExportAction::Download {
                extension: None,
                name: name.into(),
            };
            let out = export(&block("x", ".rs"), &action, "base");
            assert!(
                matches!(write_export(&out_dir, &out), Err(Error::InvalidFileName(_))),
                "{name}"
            );
        }
        assert!(!dir.path().join("escaped.rs").exists());
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_write_export_accepts_dotted_name() {
        let dir = tempfile::tempdir().unwrap();
        let action = ExportAction::Download {
            extension: None,
            name: "v1.2 notes".into(),
        };
        let out = export(&block("x", ".rs"), &action, "base");
        let path = write_export(dir.path(), &out).unwrap();
        assert_eq!(path, dir.path().join("v1.2 notes.rs"));
    }

    #[test]
    fn test_write_export_requires_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let out = Export {
            contents: "x".into(),
            file_name: None,
        };
        assert!(matches!(
            write_export(dir.path(), &out),
            Err(Error::NotADownload)
        ));
    }
}
