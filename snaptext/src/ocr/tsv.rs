//! Tesseract TSV output parsing.
//!
//! Tesseract's TSV format has one row per layout element with 12 columns:
//! `level page_num block_num par_num line_num word_num left top width height
//! conf text`. Word rows are level 5; non-word rows carry `conf` of -1.

use serde::Serialize;

/// A recognized word with its position and confidence score in [0, 100].
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct Word {
    pub text: String,
    pub confidence: f64,
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

const WORD_LEVEL: u32 = 5;

/// Parse Tesseract TSV output into words, preserving reading order.
///
/// Only word rows (level 5) with a non-negative confidence and non-empty text
/// are kept. Malformed rows are skipped.
pub fn parse_tsv(tsv: &str) -> Vec<Word> {
    tsv.lines().filter_map(parse_row).collect()
}

fn parse_row(line: &str) -> Option<Word> {
    let mut cols = line.split('\t');

    let level: u32 = cols.next()?.parse().ok()?;
    if level != WORD_LEVEL {
        return None;
    }

    // page_num, block_num, par_num, line_num, word_num
    for _ in 0..5 {
        cols.next()?;
    }

    let left: u32 = cols.next()?.parse().ok()?;
    let top: u32 = cols.next()?.parse().ok()?;
    let width: u32 = cols.next()?.parse().ok()?;
    let height: u32 = cols.next()?.parse().ok()?;
    let confidence: f64 = cols.next()?.parse().ok()?;
    if confidence < 0.0 {
        return None;
    }

    let text = cols.next()?.trim();
    if text.is_empty() {
        return None;
    }

    Some(Word {
        text: text.to_string(),
        confidence,
        left,
        top,
        width,
        height,
    })
}
