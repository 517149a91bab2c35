//! Command-line interface for sheetson
//!
//! The CLI is a thin boundary over `sheetson-data`: it moves bytes in
//! (optionally base64-encoded, the transport the original service used)
//! and JSON out, and never interprets the structured result itself.

pub mod app;

pub use app::{convert_file, list_sheets, run_cli};
