//! OCR engine wrapper.
//!
//! [`engine`] wraps Tesseract via `leptess` behind an availability-aware
//! handle: if Tesseract cannot be initialized the engine is constructed in an
//! unavailable state instead of failing, and the pipeline rejects requests up
//! front with a clear message. [`tsv`] parses Tesseract's TSV output into
//! words with per-word confidence.

pub mod engine;
pub mod tsv;

pub use engine::{OcrEngine, RecognitionResult};
pub use tsv::Word;
