use regex::Regex;
use std::sync::OnceLock;

use zapas_core::{LineItem, ParserConfig, RecognitionMode};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// Tokens reaching the parser are already normalized (commas rewritten to
// dots), so only the dot separator appears here.
re!(re_loose_quantity, r"^\d+(?:\.\d+)?$");
re!(re_price_shaped, r"^\d+\.\d{2}$");
re!(re_decimal, r"^\d+\.\d+$");

/// Per-row scan state. `SeekCode` is the outer scan; a row attempt walks
/// SeekQuantity → SeekAmount and either emits or abandons the candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
enum RowState {
    SeekQuantity,
    SeekAmount { quantity: f64 },
}

/// Scans an ordered, noise-filtered token stream and emits purchase rows.
/// Strictly left-to-right: at most one row is attempted per code candidate
/// and the scan never rewinds. Malformed rows are dropped, never reported —
/// the parser is total over any token sequence.
pub struct LineItemParser {
    config: ParserConfig,
}

impl LineItemParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn parse(&self, tokens: &[String]) -> Vec<LineItem> {
        let items = match self.config.mode {
            RecognitionMode::WindowLookahead => self.parse_windowed(tokens),
            RecognitionMode::StrictAdjacency => self.parse_adjacent(tokens),
        };
        tracing::debug!(tokens = tokens.len(), items = items.len(), "parsed token stream");
        items
    }

    /// Numeric-SKU grammar: from a code candidate, scan up to `lookahead`
    /// following tokens for a quantity, then an amount (the printed row
    /// total). On emit the scan resumes after the amount token; on abandon
    /// it resumes one past the code token, not past the window.
    fn parse_windowed(&self, tokens: &[String]) -> Vec<LineItem> {
        let mut items = Vec::new();
        let mut cursor = 0;
        while cursor < tokens.len() {
            if !self.is_code(&tokens[cursor]) {
                cursor += 1;
                continue;
            }

            let window_end = (cursor + 1 + self.config.lookahead).min(tokens.len());
            let mut state = RowState::SeekQuantity;
            let mut row = None;
            for pos in cursor + 1..window_end {
                let tok = &tokens[pos];
                match state {
                    RowState::SeekQuantity if re_loose_quantity().is_match(tok) => {
                        state = RowState::SeekAmount { quantity: parse_f64(tok) };
                    }
                    RowState::SeekAmount { quantity } if re_price_shaped().is_match(tok) => {
                        row = Some((quantity, parse_f64(tok), pos));
                        break;
                    }
                    _ => {}
                }
            }

            match row {
                Some((quantity, amount, amount_pos)) if quantity > 0.0 && amount > 0.0 => {
                    items.push(LineItem {
                        product_code: tokens[cursor].clone(),
                        quantity,
                        unit_price: None,
                        line_total: Some(amount),
                    });
                    cursor = amount_pos + 1;
                }
                _ => cursor += 1,
            }
        }
        items
    }

    /// Free-length-code grammar: the quantity must be the next numeric token
    /// after the code and must carry a decimal point; an integer-shaped
    /// token found first re-seeds the code candidate instead. The unit
    /// price must immediately follow the quantity, and the row total is
    /// computed from the two.
    fn parse_adjacent(&self, tokens: &[String]) -> Vec<LineItem> {
        let mut items = Vec::new();
        let mut cursor = 0;
        while cursor < tokens.len() {
            if !self.is_code(&tokens[cursor]) {
                cursor += 1;
                continue;
            }
            let code_pos = cursor;
            cursor += 1;

            // SEEK_QTY: step over non-numeric tokens; a second integer
            // abandons this candidate and retries from that token.
            let mut reseeded = false;
            while cursor < tokens.len() && !re_decimal().is_match(&tokens[cursor]) {
                if is_integer(&tokens[cursor]) {
                    reseeded = true;
                    break;
                }
                cursor += 1;
            }
            if reseeded {
                continue;
            }
            if cursor >= tokens.len() {
                break;
            }
            let quantity = parse_f64(&tokens[cursor]);
            cursor += 1;

            // SEEK_AMOUNT: single-step adjacency, no window.
            if cursor >= tokens.len() || !re_decimal().is_match(&tokens[cursor]) {
                continue;
            }
            let unit_price = parse_f64(&tokens[cursor]);
            cursor += 1;

            if quantity > 0.0 && unit_price > 0.0 {
                items.push(LineItem {
                    product_code: tokens[code_pos].clone(),
                    quantity,
                    unit_price: Some(unit_price),
                    line_total: Some(quantity * unit_price),
                });
            }
        }
        items
    }

    fn is_code(&self, token: &str) -> bool {
        is_integer(token) && self.config.code_len_ok(token.len())
    }
}

fn is_integer(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn parse_f64(token: &str) -> f64 {
    token.parse().unwrap_or(0.0)
}
