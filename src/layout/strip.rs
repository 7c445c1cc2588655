use super::Rect;

/// Rectangles for `count` contiguous frames laid out left to right.
///
/// Each frame is `first` shifted right by a multiple of its own width.
/// No padding is assumed and nothing is checked against the sheet bounds.
#[allow(clippy::cast_precision_loss, reason = "frame indices fit in f64")]
pub fn strip_rects(first: Rect, count: usize) -> Vec<Rect> {
    (0..count)
        .map(|index| first.translate(first.width * index as f64, 0.0))
        .collect()
}
