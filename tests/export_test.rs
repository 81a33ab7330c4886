//! Export tests: clipboard text, Markdown fences and downloaded files.

use std::fs;

use chrono::NaiveDate;

use codegrab::dom::{page_title, parse_html, parse_html_bytes};
use codegrab::export::{ExportAction, export, write_export};
use codegrab::filename::base_file_name;
use codegrab::scan::{CodeBlock, scan_page};
use codegrab::settings::Settings;

const DOCS_PAGE: &[u8] = include_bytes!("fixtures/docs_page.html");

fn docs_blocks() -> (Vec<CodeBlock>, Option<String>) {
    let mut dom = parse_html_bytes(DOCS_PAGE);
    let title = page_title(&dom);
    let blocks = scan_page(&mut dom, &Settings::default()).unwrap();
    (blocks, title)
}

fn default_base(title: Option<&str>) -> String {
    let at = NaiveDate::from_ymd_opt(2025, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();
    base_file_name(title, at)
}

#[test]
fn test_copy_plain() {
    let (blocks, _) = docs_blocks();
    let out = export(&blocks[1], &ExportAction::Copy, "unused");
    assert_eq!(out.contents, "ls -la\necho done\n");
    assert!(out.file_name.is_none());
}

#[test]
fn test_copy_markdown() {
    let (blocks, _) = docs_blocks();
    let out = export(&blocks[0], &ExportAction::CopyMarkdown, "unused");
    assert_eq!(
        out.contents,
        "```py\ndef greet(name):\n    return f\"Hello, {name}\"\n```"
    );
}

#[test]
fn test_copy_markdown_unknown_language() {
    let (blocks, _) = docs_blocks();
    let out = export(&blocks[2], &ExportAction::CopyMarkdown, "unused");
    assert_eq!(out.contents, "```txt\nfn main() {}\n```");
}

#[test]
fn test_markdown_with_backticks_in_code() {
    let mut dom = parse_html("<pre><code class=\"language-md\">```js\nx\n```</code></pre>");
    let blocks = scan_page(&mut dom, &Settings::default()).unwrap();
    let out = export(&blocks[0], &ExportAction::CopyMarkdown, "unused");
    assert_eq!(out.contents, "````md\n```js\nx\n```\n````");
}

#[test]
fn test_download_name_from_page_title() {
    let (blocks, title) = docs_blocks();
    let base = default_base(title.as_deref());
    assert_eq!(base, "Getting_Started__Tools_&_Tips_20250102_030405");

    let action = ExportAction::Download {
        extension: None,
        name: String::new(),
    };
    let out = export(&blocks[3], &action, &base);
    assert_eq!(
        out.file_name.as_deref(),
        Some("Getting_Started__Tools_&_Tips_20250102_030405.rs")
    );
}

#[test]
fn test_download_to_disk() {
    let (blocks, _) = docs_blocks();
    let dir = tempfile::tempdir().unwrap();

    let action = ExportAction::Download {
        extension: Some("py".into()),
        name: "greet".into(),
    };
    let out = export(&blocks[0], &action, &default_base(None));
    let path = write_export(dir.path(), &out).unwrap();

    assert_eq!(path.file_name().unwrap(), "greet.py");
    assert_eq!(fs::read_to_string(&path).unwrap(), blocks[0].text);
}
