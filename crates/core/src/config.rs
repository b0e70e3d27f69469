use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Which row grammar the line-item parser applies. Receipt sources differ in
/// how product codes and price columns are printed, so the mode is picked
/// per deployment rather than guessed per image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionMode {
    /// Numeric product code, quantity and amount found within a bounded
    /// lookahead window past the code.
    WindowLookahead,
    /// Product code confirmed only once a decimal-shaped quantity follows;
    /// the unit price must be immediately adjacent to the quantity.
    StrictAdjacency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub mode: RecognitionMode,
    /// Minimum digit count for a token to qualify as a product code.
    pub code_digits_min: usize,
    /// Maximum digit count, unbounded when `None`.
    pub code_digits_max: Option<usize>,
    /// How many tokens past the code the windowed grammar may scan.
    /// Ignored by the strict-adjacency grammar.
    pub lookahead: usize,
}

impl ParserConfig {
    /// Defaults for receipts with a 2–5 digit SKU column.
    pub fn window_lookahead() -> Self {
        Self {
            mode: RecognitionMode::WindowLookahead,
            code_digits_min: 2,
            code_digits_max: Some(5),
            lookahead: 11,
        }
    }

    /// Defaults for receipts with free-length numeric codes.
    pub fn strict_adjacency() -> Self {
        Self {
            mode: RecognitionMode::StrictAdjacency,
            code_digits_min: 1,
            code_digits_max: None,
            lookahead: 11,
        }
    }

    pub fn code_len_ok(&self, len: usize) -> bool {
        len >= self.code_digits_min && self.code_digits_max.is_none_or(|max| len <= max)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::window_lookahead()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Recognizer confidence below which a fragment is dropped before it
    /// reaches the normalizer. Only applies when scores are present.
    pub score_min: f32,
    pub parser: ParserConfig,
}

impl PipelineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            score_min: 0.6,
            parser: ParserConfig::default(),
        }
    }
}
