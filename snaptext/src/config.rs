use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Tesseract language codes, `+`-separated (e.g. "eng", "eng+deu").
    pub languages: String,
    /// Wall-clock budget for one extraction, covering all candidates.
    pub timeout_secs: u64,
}

/// Knobs for the enhancement fan-out and best-result selection.
///
/// The selector weighting constants are configuration, not magic numbers:
/// `score = avg_confidence * (n / (n + word_count_weight))`, with results
/// shorter than `min_word_floor` words additionally multiplied by
/// `short_result_penalty`.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub word_count_weight: f64,
    pub min_word_floor: usize,
    pub short_result_penalty: f64,
    /// Words scoring below this are counted as low-confidence.
    pub low_confidence_threshold: f64,
    /// Upscaling only kicks in when the shorter dimension is below this.
    pub upscale_min_dimension: u32,
    pub upscale_factor: u32,
    /// Block radius for the locally-adaptive threshold.
    pub adaptive_block_radius: u32,
    /// Median filter radius for the denoise strategy.
    pub denoise_radius: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: env::var("SNAPTEXT_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_env_or("SNAPTEXT_PORT", 5000),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            languages: env::var("OCR_LANGUAGES").unwrap_or_else(|_| "eng".to_string()),
            timeout_secs: parse_env_or("OCR_TIMEOUT", 30),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            word_count_weight: parse_env_or("SELECTOR_WORD_WEIGHT", 2.0),
            min_word_floor: parse_env_or("SELECTOR_MIN_WORDS", 3),
            short_result_penalty: parse_env_or("SELECTOR_SHORT_PENALTY", 0.5),
            low_confidence_threshold: parse_env_or("LOW_CONFIDENCE_THRESHOLD", 60.0),
            upscale_min_dimension: parse_env_or("UPSCALE_MIN_DIMENSION", 300),
            upscale_factor: parse_env_or("UPSCALE_FACTOR", 2),
            adaptive_block_radius: parse_env_or("ADAPTIVE_BLOCK_RADIUS", 12),
            denoise_radius: parse_env_or("DENOISE_RADIUS", 1),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            ocr: OcrConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
