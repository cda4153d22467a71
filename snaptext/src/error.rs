use thiserror::Error;

/// Failure taxonomy for one extraction.
///
/// HTTP status mapping lives in the API envelope
/// (`api::response::ErrorCode`); errors themselves carry no transport
/// concerns.
#[derive(Error, Debug)]
pub enum SnapTextError {
    #[error("Empty input: no image bytes provided")]
    EmptyInput,

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("OCR unavailable: {0}")]
    OcrUnavailable(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("Extraction timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SnapTextError>;
