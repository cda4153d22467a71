use serde::Serialize;

use crate::ocr::RecognitionResult;

/// Aggregated quality metric for the winning recognition result.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct ConfidenceSummary {
    /// Arithmetic mean of per-word scores, 0 when there are no words.
    pub average_confidence: f64,
    pub word_count: usize,
    /// Words scoring below the configured threshold (default 60).
    pub low_confidence_words: usize,
}

/// Summarize per-word confidence into an overall quality metric.
///
/// Total over any result, including one with zero words.
pub fn summarize(result: &RecognitionResult, low_confidence_threshold: f64) -> ConfidenceSummary {
    let word_count = result.words.len();
    if word_count == 0 {
        return ConfidenceSummary {
            average_confidence: 0.0,
            word_count: 0,
            low_confidence_words: 0,
        };
    }

    let total: f64 = result.words.iter().map(|w| w.confidence).sum();
    let low_confidence_words = result
        .words
        .iter()
        .filter(|w| w.confidence < low_confidence_threshold)
        .count();

    ConfidenceSummary {
        average_confidence: total / word_count as f64,
        word_count,
        low_confidence_words,
    }
}
