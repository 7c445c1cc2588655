mod grid;
mod rect;
mod strip;

pub use grid::GridLayout;
pub use rect::{PixelRect, Rect};
pub use strip::strip_rects;
