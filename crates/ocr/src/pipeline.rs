use serde::Serialize;
use thiserror::Error;

use zapas_core::{LineItem, PipelineConfig};

use crate::filter::is_noise;
use crate::normalize::normalize_token;
use crate::parser::LineItemParser;
use crate::recognizer::{RecognizeError, RecognizerOutput, TokenRecognizer};
use crate::sequence::{self, BoundingBox, PlacedToken, SequenceError};

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The engine call itself failed — the job layer may retry.
    #[error("OCR recognition failed: {0}")]
    Recognize(#[from] RecognizeError),
    /// The engine returned geometry the sequencer cannot trust; parsing a
    /// mis-sequenced stream would corrupt every row, so the whole
    /// invocation fails instead.
    #[error("Malformed recognizer output: {0}")]
    MalformedOutput(#[from] SequenceError),
    #[error("Parser invariant violated: {0}")]
    Invariant(&'static str),
}

/// The result of one receipt parse: the surviving normalized tokens joined
/// for audit storage, and the structured purchase rows.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedReceipt {
    pub raw_text: String,
    pub items: Vec<LineItem>,
}

/// Orchestrates: recognize → score-gate → normalize → filter → sequence →
/// parse. Stateless across invocations; concurrent receipts share nothing.
pub struct ReceiptPipeline<R: TokenRecognizer> {
    recognizer: R,
    score_min: f32,
    parser: LineItemParser,
}

impl<R: TokenRecognizer> ReceiptPipeline<R> {
    pub fn new(recognizer: R, config: PipelineConfig) -> Self {
        Self {
            recognizer,
            score_min: config.score_min,
            parser: LineItemParser::new(config.parser),
        }
    }

    /// Run the full pipeline over one receipt image.
    pub fn process(&self, image_bytes: &[u8]) -> Result<ParsedReceipt, PipelineError> {
        let output = self.recognizer.recognize(image_bytes)?;
        self.parse_output(output)
    }

    /// The pure core: turn recognizer output into structured line items.
    /// Exposed separately so callers holding tokens (and tests) can skip
    /// the engine call.
    pub fn parse_output(&self, output: RecognizerOutput) -> Result<ParsedReceipt, PipelineError> {
        let texts = match output {
            RecognizerOutput::Plain(texts) => texts
                .iter()
                .map(|t| normalize_token(t))
                .filter(|t| !is_noise(t))
                .collect(),
            RecognizerOutput::Spatial(fragments) => {
                let mut placed = Vec::with_capacity(fragments.len());
                for frag in &fragments {
                    if frag.score < self.score_min {
                        continue;
                    }
                    let text = normalize_token(&frag.text);
                    if is_noise(&text) {
                        continue;
                    }
                    let bbox = BoundingBox::from_points(&frag.box_points)?;
                    placed.push(PlacedToken { text, bbox });
                }
                sequence::sequence(placed)
            }
        };

        tracing::debug!(tokens = ?texts, "surviving token stream");

        let items = self.parser.parse(&texts);
        if items.len() * 3 > texts.len() {
            // Each row consumes at least a code, a quantity and an amount.
            return Err(PipelineError::Invariant(
                "emitted more rows than the token stream can hold",
            ));
        }
        tracing::info!(tokens = texts.len(), items = items.len(), "receipt parsed");

        Ok(ParsedReceipt {
            raw_text: texts.join("\n"),
            items,
        })
    }
}
