use thiserror::Error;

#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("bounding box has {0} points, expected 4")]
    MalformedBox(usize),
}

/// Marker naming the header row's code column ("Код ... Кол-во ... Сумма").
const HEADER_MARKER: &str = "код";
/// Marker opening the totals footer.
const FOOTER_MARKER: &str = "всего";
/// Tokens overlapping the header row within this margin are still header.
const HEADER_MARGIN_PX: f32 = 5.0;

/// Quadrilateral bounding box in image pixel space. The recognizer reports
/// four corner points per fragment; anything else is malformed output and
/// must fail the invocation rather than mis-sequence the whole receipt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    points: [(f32, f32); 4],
}

impl BoundingBox {
    pub fn from_points(points: &[(f32, f32)]) -> Result<Self, SequenceError> {
        let points: [(f32, f32); 4] = points
            .try_into()
            .map_err(|_| SequenceError::MalformedBox(points.len()))?;
        Ok(Self { points })
    }

    /// Smallest y — the box's top edge in image coordinates.
    pub fn top(&self) -> f32 {
        self.points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min)
    }

    /// Largest y — the box's bottom edge.
    pub fn bottom(&self) -> f32 {
        self.points.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn vertical_center(&self) -> f32 {
        self.points.iter().map(|p| p.1).sum::<f32>() / 4.0
    }

    pub fn horizontal_center(&self) -> f32 {
        self.points.iter().map(|p| p.0).sum::<f32>() / 4.0
    }
}

/// A normalized token together with where it sits on the image.
#[derive(Debug, Clone)]
pub struct PlacedToken {
    pub text: String,
    pub bbox: BoundingBox,
}

/// Order spatially scattered tokens into reading order and cut away the
/// column-header row and the totals footer. Boxes are consumed here; the
/// parser downstream only ever sees text.
pub fn sequence(mut tokens: Vec<PlacedToken>) -> Vec<String> {
    // Top-to-bottom, then left-to-right; ties broken by horizontal position.
    tokens.sort_by(|a, b| {
        a.bbox
            .vertical_center()
            .total_cmp(&b.bbox.vertical_center())
            .then(a.bbox.horizontal_center().total_cmp(&b.bbox.horizontal_center()))
    });

    let tokens = crop_header(tokens);

    let mut texts: Vec<String> = tokens.into_iter().map(|t| t.text).collect();
    if let Some(end) = texts
        .iter()
        .position(|t| t.to_lowercase().contains(FOOTER_MARKER))
    {
        texts.truncate(end);
    }
    texts
}

/// Keep only tokens strictly below the header row. The header is located by
/// the topmost token containing the code-column marker; when absent the
/// receipt is left uncropped.
fn crop_header(tokens: Vec<PlacedToken>) -> Vec<PlacedToken> {
    let header_bottom = tokens
        .iter()
        .filter(|t| t.text.to_lowercase().contains(HEADER_MARKER))
        .min_by(|a, b| a.bbox.top().total_cmp(&b.bbox.top()))
        .map(|h| h.bbox.bottom());

    match header_bottom {
        Some(y_max) => tokens
            .into_iter()
            .filter(|t| t.bbox.top() > y_max + HEADER_MARGIN_PX)
            .collect(),
        None => tokens,
    }
}
