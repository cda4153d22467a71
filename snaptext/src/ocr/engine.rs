use std::sync::Arc;

use leptess::LepTess;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::OcrConfig;
use crate::error::{Result, SnapTextError};
use crate::imaging::Raster;
use crate::ocr::tsv::{parse_tsv, Word};

/// OCR output for a single candidate raster.
#[derive(Debug, Clone)]
pub struct RecognitionResult {
    /// Name of the enhancement strategy that produced the candidate.
    pub strategy: &'static str,
    /// Full recognized text, layout-aware (line breaks preserved).
    pub text: String,
    /// Recognized words in reading order, with per-word confidence.
    pub words: Vec<Word>,
}

enum EngineBackend {
    Tesseract { handle: Arc<Mutex<LepTess>> },
    Unavailable { reason: String },
}

/// Tesseract engine handle, constructed once per process.
///
/// Construction never fails: if Tesseract is not installed (or its language
/// data is missing) the engine comes up in an unavailable state and every
/// recognition attempt returns [`SnapTextError::OcrUnavailable`]. Callers
/// check [`OcrEngine::unavailable_reason`] once, up front, instead of
/// retrying per candidate.
pub struct OcrEngine {
    backend: EngineBackend,
    languages: String,
}

fn create_tesseract(languages: &str) -> std::result::Result<LepTess, String> {
    LepTess::new(None, languages).map_err(|e| e.to_string())
}

impl OcrEngine {
    pub fn new(config: &OcrConfig) -> Self {
        let backend = match create_tesseract(&config.languages) {
            Ok(lt) => {
                info!(languages = %config.languages, "Tesseract OCR initialized");
                EngineBackend::Tesseract {
                    handle: Arc::new(Mutex::new(lt)),
                }
            }
            Err(e) => {
                let reason = format!("Tesseract not available: {e}");
                warn!("{}", reason);
                EngineBackend::Unavailable { reason }
            }
        };

        Self {
            backend,
            languages: config.languages.clone(),
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, EngineBackend::Unavailable { .. })
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.backend {
            EngineBackend::Unavailable { reason } => Some(reason),
            _ => None,
        }
    }

    pub fn languages(&self) -> &str {
        &self.languages
    }

    /// Run Tesseract against one candidate raster.
    ///
    /// Blocking; the pipeline calls this from the blocking thread pool. A
    /// `language` hint differing from the configured default spins up a
    /// transient Tesseract instance for this call only.
    pub fn recognize(
        &self,
        raster: &Raster,
        strategy: &'static str,
        language: Option<&str>,
    ) -> Result<RecognitionResult> {
        let handle = match &self.backend {
            EngineBackend::Tesseract { handle } => handle,
            EngineBackend::Unavailable { reason } => {
                return Err(SnapTextError::OcrUnavailable(reason.clone()));
            }
        };

        let png = raster.to_png_bytes()?;

        match language.filter(|lang| *lang != self.languages) {
            Some(lang) => {
                let mut lt = create_tesseract(lang).map_err(|e| {
                    SnapTextError::Ocr(format!("Failed to load language '{lang}': {e}"))
                })?;
                run_recognition(&mut lt, &png, strategy)
            }
            None => {
                let mut lt = handle.blocking_lock();
                run_recognition(&mut lt, &png, strategy)
            }
        }
    }
}

fn run_recognition(lt: &mut LepTess, png: &[u8], strategy: &'static str) -> Result<RecognitionResult> {
    lt.set_image_from_mem(png)
        .map_err(|e| SnapTextError::Ocr(format!("Failed to set image: {e}")))?;

    let text = lt
        .get_utf8_text()
        .map_err(|e| SnapTextError::Ocr(format!("Failed to extract text: {e}")))?
        .trim()
        .to_string();

    let tsv = lt
        .get_tsv_text(0)
        .map_err(|e| SnapTextError::Ocr(format!("Failed to read word data: {e}")))?;

    Ok(RecognitionResult {
        strategy,
        text,
        words: parse_tsv(&tsv),
    })
}

impl Clone for OcrEngine {
    fn clone(&self) -> Self {
        let backend = match &self.backend {
            EngineBackend::Tesseract { handle } => EngineBackend::Tesseract {
                handle: Arc::clone(handle),
            },
            EngineBackend::Unavailable { reason } => EngineBackend::Unavailable {
                reason: reason.clone(),
            },
        };
        Self {
            backend,
            languages: self.languages.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> OcrConfig {
        OcrConfig {
            languages: "eng".to_string(),
            timeout_secs: 30,
        }
    }

    #[test]
    fn test_engine_construction_never_fails() {
        // Either the engine comes up or it degrades to unavailable
        let engine = OcrEngine::new(&test_config());
        if !engine.is_available() {
            assert!(engine.unavailable_reason().is_some());
        }
    }

    #[test]
    fn test_unavailable_engine_rejects_recognition() {
        let engine = OcrEngine {
            backend: EngineBackend::Unavailable {
                reason: "test unavailable".to_string(),
            },
            languages: "eng".to_string(),
        };

        let raster = Raster::new(image::DynamicImage::new_rgb8(50, 50));
        let result = engine.recognize(&raster, "original", None);
        assert!(matches!(result, Err(SnapTextError::OcrUnavailable(_))));
    }

    #[test]
    fn test_engine_clone_shares_availability() {
        let engine = OcrEngine::new(&test_config());
        let cloned = engine.clone();
        assert_eq!(engine.is_available(), cloned.is_available());
        assert_eq!(engine.languages(), cloned.languages());
    }
}
