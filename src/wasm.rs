//! WASM bindings for in-browser code block detection.
//!
//! Exposes page scanning and exports to JavaScript via wasm-bindgen. Blocks
//! cross the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::dom::{page_title, parse_html};
use crate::export::{ExportAction, export};
use crate::filename::base_file_name_now;
use crate::scan::{CodeBlock, find_block, scan_page};
use crate::settings::Settings;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn settings_from(json: Option<String>) -> Result<Settings, JsValue> {
    match json {
        Some(json) => serde_json::from_str(&json).map_err(to_js),
        None => Ok(Settings::default()),
    }
}

fn blocks_of(html: &str, settings: &Settings) -> Result<Vec<CodeBlock>, JsValue> {
    let mut dom = parse_html(html);
    scan_page(&mut dom, settings).map_err(to_js)
}

/// Scan an HTML page and return its code blocks as a JSON array.
///
/// `settings` is an optional settings JSON object.
#[wasm_bindgen]
pub fn scan_page_json(html: &str, settings: Option<String>) -> Result<String, JsValue> {
    let settings = settings_from(settings)?;
    let blocks = blocks_of(html, &settings)?;
    serde_json::to_string(&blocks).map_err(to_js)
}

/// Map a language label to a file extension.
#[wasm_bindgen]
pub fn resolve_extension(label: &str) -> String {
    crate::extension::resolve_extension(label)
}

/// Markdown fence for block `index` of the page.
#[wasm_bindgen]
pub fn markdown_for_block(html: &str, index: usize) -> Result<String, JsValue> {
    let blocks = blocks_of(html, &Settings::default())?;
    let block = find_block(&blocks, index).map_err(to_js)?;
    Ok(export(block, &ExportAction::CopyMarkdown, "").contents)
}

/// Apply an export action (JSON, e.g. `{"action":"download"}`) to block
/// `index` and return the resulting export as JSON.
#[wasm_bindgen]
pub fn export_block(html: &str, index: usize, action: &str) -> Result<String, JsValue> {
    let action: ExportAction = serde_json::from_str(action).map_err(to_js)?;
    let mut dom = parse_html(html);
    let title = page_title(&dom);
    let blocks = scan_page(&mut dom, &Settings::default()).map_err(to_js)?;
    let block = find_block(&blocks, index).map_err(to_js)?;

    let out = export(block, &action, &base_file_name_now(title.as_deref()));
    serde_json::to_string(&out).map_err(to_js)
}
