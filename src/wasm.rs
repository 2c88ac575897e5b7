//! WASM Bindings Module
//!
//! This module provides WebAssembly bindings for colorsheet, allowing a
//! browser frontend to colorize an uploaded spreadsheet without a server
//! round-trip. Enabled with the `wasm` feature on the wasm32 target.

use wasm_bindgen::prelude::*;

use crate::builder::ProcessorBuilder;

/// Process an uploaded spreadsheet and return the result as JSON
///
/// The JSON object mirrors `ProcessResult` in camelCase (success, message,
/// rowCount, preview, outputFileName). Document bytes are not included;
/// call [`render_document`] to obtain them.
///
/// # Arguments
/// * `bytes` - file content as a Uint8Array from JavaScript
/// * `file_name` - the uploaded file's name
#[wasm_bindgen]
pub fn process_spreadsheet(bytes: &[u8], file_name: &str) -> Result<String, String> {
    let processor = ProcessorBuilder::new()
        .build()
        .map_err(|e| format!("Failed to create processor: {}", e))?;

    let result = processor.process(bytes, file_name);
    serde_json::to_string(&result).map_err(|e| format!("Serialization error: {}", e))
}

/// Produce the styled SpreadsheetML document for an uploaded spreadsheet
///
/// Returns the raw document bytes suitable for a download Blob with the
/// `application/vnd.ms-excel` MIME type.
#[wasm_bindgen]
pub fn render_document(bytes: &[u8], file_name: &str) -> Result<Vec<u8>, String> {
    let processor = ProcessorBuilder::new()
        .build()
        .map_err(|e| format!("Failed to create processor: {}", e))?;

    let result = processor.process(bytes, file_name);
    if result.is_success() {
        Ok(result.document.unwrap_or_default())
    } else {
        Err(result.message)
    }
}

/// Get version information
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
