pub mod filter;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod recognizer;
pub mod sequence;

pub use filter::is_noise;
pub use normalize::normalize_token;
pub use parser::LineItemParser;
pub use pipeline::{ParsedReceipt, PipelineError, ReceiptPipeline};
pub use recognizer::{Fragment, MockRecognizer, RecognizeError, RecognizerOutput, TokenRecognizer};
pub use sequence::{BoundingBox, PlacedToken, SequenceError};
