//! SnapText: screenshot text extraction.
//!
//! Decodes an uploaded image, derives a set of enhanced variants, OCRs every
//! candidate with Tesseract, and returns the best result together with a
//! per-word confidence summary. Exposed as an HTTP API and a CLI.

pub mod api;
pub mod config;
pub mod error;
pub mod imaging;
pub mod ocr;
pub mod pipeline;
