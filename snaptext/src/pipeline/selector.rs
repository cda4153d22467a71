use tracing::debug;

use crate::config::PipelineConfig;
use crate::ocr::RecognitionResult;

/// Score one recognition result.
///
/// `score = avg_confidence * (n / (n + word_count_weight))` where `n` is the
/// word count. The saturating weight keeps a near-empty high-confidence
/// result from beating a substantive lower-confidence one; results below
/// `min_word_floor` words are additionally multiplied by
/// `short_result_penalty`. A zero-word result scores 0.
pub fn score(result: &RecognitionResult, config: &PipelineConfig) -> f64 {
    let n = result.words.len();
    if n == 0 {
        return 0.0;
    }

    let avg: f64 = result.words.iter().map(|w| w.confidence).sum::<f64>() / n as f64;
    let mut score = avg * (n as f64 / (n as f64 + config.word_count_weight));

    if n < config.min_word_floor {
        score *= config.short_result_penalty;
    }

    score
}

/// Pick the best recognition result.
///
/// `results` must be ordered baseline-first, then strategies in declaration
/// order; ties go to the earlier entry (strict `>` comparison), which gives
/// the baseline priority. Returns `None` only for an empty input set.
pub fn select_best(
    results: Vec<RecognitionResult>,
    config: &PipelineConfig,
) -> Option<RecognitionResult> {
    let mut best: Option<(f64, RecognitionResult)> = None;

    for result in results {
        let s = score(&result, config);
        debug!(
            strategy = result.strategy,
            words = result.words.len(),
            score = s,
            "candidate scored"
        );
        match &best {
            Some((best_score, _)) if s <= *best_score => {}
            _ => best = Some((s, result)),
        }
    }

    best.map(|(_, result)| result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::Word;

    fn test_config() -> PipelineConfig {
        PipelineConfig {
            word_count_weight: 2.0,
            min_word_floor: 3,
            short_result_penalty: 0.5,
            low_confidence_threshold: 60.0,
            upscale_min_dimension: 300,
            upscale_factor: 2,
            adaptive_block_radius: 12,
            denoise_radius: 1,
        }
    }

    fn result(strategy: &'static str, confidences: &[f64]) -> RecognitionResult {
        let words = confidences
            .iter()
            .enumerate()
            .map(|(i, c)| Word {
                text: format!("w{i}"),
                confidence: *c,
                left: 0,
                top: 0,
                width: 10,
                height: 10,
            })
            .collect::<Vec<_>>();
        RecognitionResult {
            strategy,
            text: words
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            words,
        }
    }

    #[test]
    fn test_score_zero_words() {
        assert_eq!(score(&result("original", &[]), &test_config()), 0.0);
    }

    #[test]
    fn test_score_grows_with_word_count() {
        let cfg = test_config();
        let short = score(&result("original", &[90.0; 3]), &cfg);
        let long = score(&result("original", &[90.0; 10]), &cfg);
        assert!(long > short, "same confidence, more words should score higher");
    }

    #[test]
    fn test_short_result_penalized() {
        let cfg = test_config();
        // One word at 99 confidence vs five words at 80
        let near_empty = score(&result("denoise", &[99.0]), &cfg);
        let substantive = score(&result("original", &[80.0; 5]), &cfg);
        assert!(
            substantive > near_empty,
            "a substantive result should beat a near-empty high-confidence one"
        );
    }

    #[test]
    fn test_select_best_picks_max_score() {
        let cfg = test_config();
        let winner = select_best(
            vec![
                result("original", &[70.0; 5]),
                result("grayscale_contrast", &[90.0; 5]),
                result("denoise", &[60.0; 5]),
            ],
            &cfg,
        )
        .unwrap();
        assert_eq!(winner.strategy, "grayscale_contrast");
    }

    #[test]
    fn test_tie_break_prefers_baseline() {
        let cfg = test_config();
        let winner = select_best(
            vec![
                result("original", &[85.0; 4]),
                result("adaptive_threshold", &[85.0; 4]),
            ],
            &cfg,
        )
        .unwrap();
        assert_eq!(winner.strategy, "original");
    }

    #[test]
    fn test_tie_break_respects_declaration_order() {
        let cfg = test_config();
        let winner = select_best(
            vec![
                result("original", &[]),
                result("grayscale_contrast", &[85.0; 4]),
                result("denoise", &[85.0; 4]),
            ],
            &cfg,
        )
        .unwrap();
        assert_eq!(winner.strategy, "grayscale_contrast");
    }

    #[test]
    fn test_all_empty_returns_first() {
        let cfg = test_config();
        let winner = select_best(
            vec![result("original", &[]), result("denoise", &[])],
            &cfg,
        )
        .unwrap();
        assert_eq!(winner.strategy, "original");
    }

    #[test]
    fn test_select_best_empty_set() {
        assert!(select_best(vec![], &test_config()).is_none());
    }
}
