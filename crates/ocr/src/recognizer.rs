use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecognizeError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
}

/// One recognized text fragment from a spatially-aware engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    /// Recognizer confidence in [0, 1].
    pub score: f32,
    /// Quadrilateral corner points in image pixel space. Validated to
    /// exactly four points by the sequencer.
    pub box_points: Vec<(f32, f32)>,
}

/// What an OCR engine hands the pipeline. Engines differ: some report
/// per-fragment confidence and geometry, some only a bag of strings.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognizerOutput {
    Plain(Vec<String>),
    Spatial(Vec<Fragment>),
}

/// Abstraction over the external OCR engine. Implementations accept raw
/// image bytes and return recognized tokens; the pipeline never touches the
/// engine directly, so tests substitute a mock.
pub trait TokenRecognizer: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<RecognizerOutput, RecognizeError>;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set token stream regardless of the image handed in.
pub struct MockRecognizer {
    pub output: RecognizerOutput,
}

impl MockRecognizer {
    pub fn plain<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            output: RecognizerOutput::Plain(texts.into_iter().map(Into::into).collect()),
        }
    }

    pub fn spatial(fragments: Vec<Fragment>) -> Self {
        Self {
            output: RecognizerOutput::Spatial(fragments),
        }
    }
}

impl TokenRecognizer for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<RecognizerOutput, RecognizeError> {
        Ok(self.output.clone())
    }
}
