//! The extraction pipeline.
//!
//! One input image fans out into the unmodified baseline plus the fixed
//! enhancement strategies, each candidate is OCR'd, and the best-scoring
//! result wins. Stateless and request-scoped: the only shared state is the
//! engine handle, constructed once per process and passed in explicitly.

pub mod confidence;
pub mod selector;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Result, SnapTextError};
use crate::imaging::{loader, Strategy};
use crate::ocr::OcrEngine;

pub use confidence::ConfidenceSummary;

/// Strategy label for the unmodified original, always the first candidate.
pub const BASELINE_STRATEGY: &str = "original";

/// Confidence side of a [`FinalResult`]: a summary when text was found, an
/// explanatory error otherwise.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum ConfidenceReport {
    Summary(ConfidenceSummary),
    Unavailable { error: String },
}

/// The pipeline's single output per input image.
///
/// Empty `text` with `confidence.error` set means "no text found" — a normal
/// terminal outcome, not a fault.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct FinalResult {
    pub text: String,
    pub confidence: ConfidenceReport,
    /// Strategy that produced the winning result, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

impl FinalResult {
    fn no_text_found() -> Self {
        Self {
            text: String::new(),
            confidence: ConfidenceReport::Unavailable {
                error: "No text detected in image".to_string(),
            },
            strategy: None,
        }
    }
}

#[derive(Clone)]
pub struct Pipeline {
    engine: Arc<OcrEngine>,
    config: Arc<Config>,
}

impl Pipeline {
    pub fn new(engine: Arc<OcrEngine>, config: Arc<Config>) -> Self {
        Self { engine, config }
    }

    /// Run the full pipeline on raw image bytes.
    ///
    /// The whole call is bounded by the configured wall-clock timeout;
    /// expiry surfaces as [`SnapTextError::Timeout`], distinct from OCR
    /// failures.
    pub async fn extract(
        &self,
        bytes: Vec<u8>,
        language: Option<String>,
    ) -> Result<FinalResult> {
        let timeout_secs = self.config.ocr.timeout_secs;
        let duration = Duration::from_secs(timeout_secs);

        match tokio::time::timeout(duration, self.extract_internal(bytes, language)).await {
            Ok(result) => result,
            Err(_) => Err(SnapTextError::Timeout(timeout_secs)),
        }
    }

    async fn extract_internal(
        &self,
        bytes: Vec<u8>,
        language: Option<String>,
    ) -> Result<FinalResult> {
        if bytes.is_empty() {
            return Err(SnapTextError::EmptyInput);
        }

        let engine = Arc::clone(&self.engine);
        let config = Arc::clone(&self.config);

        // Decode, enhancement, and Tesseract are all CPU-bound
        tokio::task::spawn_blocking(move || {
            run_pipeline(&engine, &config, &bytes, language.as_deref())
        })
        .await
        .map_err(|e| SnapTextError::Ocr(format!("Extraction task panicked: {e}")))?
    }
}

fn run_pipeline(
    engine: &OcrEngine,
    config: &Config,
    bytes: &[u8],
    language: Option<&str>,
) -> Result<FinalResult> {
    let original = loader::load_from_bytes(bytes)?;

    // Engine loss is fatal for the whole request: every candidate would fail
    // identically, so bail before any candidate-level work.
    if let Some(reason) = engine.unavailable_reason() {
        return Err(SnapTextError::OcrUnavailable(reason.to_string()));
    }

    let mut results = Vec::with_capacity(Strategy::ALL.len() + 1);

    match engine.recognize(&original, BASELINE_STRATEGY, language) {
        Ok(result) => results.push(result),
        Err(e @ SnapTextError::OcrUnavailable(_)) => return Err(e),
        Err(e) => warn!(strategy = BASELINE_STRATEGY, error = %e, "candidate dropped"),
    }

    for strategy in Strategy::ALL {
        let Some(candidate) = strategy.apply(&original, &config.pipeline) else {
            debug!(strategy = strategy.name(), "strategy not applicable, skipped");
            continue;
        };

        match engine.recognize(&candidate, strategy.name(), language) {
            Ok(result) => results.push(result),
            Err(e @ SnapTextError::OcrUnavailable(_)) => return Err(e),
            Err(e) => warn!(strategy = strategy.name(), error = %e, "candidate dropped"),
        }
    }

    match selector::select_best(results, &config.pipeline) {
        Some(winner) if !winner.text.is_empty() => {
            debug!(
                strategy = winner.strategy,
                words = winner.words.len(),
                "best candidate selected"
            );
            let summary =
                confidence::summarize(&winner, config.pipeline.low_confidence_threshold);
            Ok(FinalResult {
                text: winner.text,
                confidence: ConfidenceReport::Summary(summary),
                strategy: Some(winner.strategy.to_string()),
            })
        }
        _ => Ok(FinalResult::no_text_found()),
    }
}
