#![cfg_attr(not(feature = "std"), no_std)]

//! colorsheet - Pure-Rust spreadsheet color annotator
//!
//! This crate parses a spreadsheet (XLS, XLSX, or its own SpreadsheetML
//! output), extracts hexadecimal color codes from column B, and produces
//! (a) a preview list for UI display and (b) an Excel 2003 XML document in
//! which column D of every colored row carries a solid-fill style.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs;
//! use colorsheet::ProcessorBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let processor = ProcessorBuilder::new().build()?;
//!
//!     let bytes = fs::read("colors.xlsx")?;
//!     let result = processor.process(&bytes, "colors.xlsx");
//!
//!     if result.is_success() {
//!         for row in result.preview_rows() {
//!             println!("{}: {} -> {}", row.row, row.name, row.hex);
//!         }
//!         fs::write("colors_preview.xml", result.document().unwrap())?;
//!     } else {
//!         eprintln!("{}", result.message);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # In-memory processing
//!
//! `process` is a pure function of its input bytes; there is no shared
//! state, no persistence and no network access:
//!
//! ```rust
//! use colorsheet::ProcessorBuilder;
//!
//! # fn main() -> Result<(), colorsheet::ColorSheetError> {
//! let processor = ProcessorBuilder::new().build()?;
//! let result = processor.process(b"not a spreadsheet", "bad.bin");
//! assert!(!result.is_success());
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use colorsheet::ProcessorBuilder;
//!
//! fn main() -> Result<(), colorsheet::ColorSheetError> {
//!     // Read colors from column C, style column F instead
//!     let processor = ProcessorBuilder::new()
//!         .with_color_column(2)
//!         .with_style_column(5)
//!         .with_sheet_name("Palette")
//!         .build()?;
//!
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod color;
mod error;
mod ingest;
mod security;
mod style;
mod types;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod wasm;
mod writer;

// 公開API
pub use api::{ColorRow, ProcessResult, OUTPUT_MIME_TYPE};
pub use builder::{Processor, ProcessorBuilder};
pub use error::ColorSheetError;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub use wasm::{get_version, process_spreadsheet, render_document};
