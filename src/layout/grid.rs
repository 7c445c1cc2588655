use serde::{Deserialize, Serialize};

use super::Rect;

/// Uniform grid of frames with optional margins and inter-cell padding.
///
/// The right and bottom margins default to the left and top margins when
/// they are not set explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: u32,
    pub cols: u32,
    #[serde(default, rename = "margin_left")]
    pub x_margin_left: f64,
    #[serde(default, rename = "margin_right")]
    pub x_margin_right: Option<f64>,
    #[serde(default, rename = "padding_x")]
    pub x_padding: f64,
    #[serde(default, rename = "margin_top")]
    pub y_margin_top: f64,
    #[serde(default, rename = "margin_bottom")]
    pub y_margin_bottom: Option<f64>,
    #[serde(default, rename = "padding_y")]
    pub y_padding: f64,
}

impl GridLayout {
    /// `rows` and `cols` must both be at least 1.
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            x_margin_left: 0.0,
            x_margin_right: None,
            x_padding: 0.0,
            y_margin_top: 0.0,
            y_margin_bottom: None,
            y_padding: 0.0,
        }
    }

    pub fn x_margin_left(mut self, margin: f64) -> Self {
        self.x_margin_left = margin;
        self
    }

    pub fn x_margin_right(mut self, margin: f64) -> Self {
        self.x_margin_right = Some(margin);
        self
    }

    pub fn x_padding(mut self, padding: f64) -> Self {
        self.x_padding = padding;
        self
    }

    pub fn y_margin_top(mut self, margin: f64) -> Self {
        self.y_margin_top = margin;
        self
    }

    pub fn y_margin_bottom(mut self, margin: f64) -> Self {
        self.y_margin_bottom = Some(margin);
        self
    }

    pub fn y_padding(mut self, padding: f64) -> Self {
        self.y_padding = padding;
        self
    }

    /// Total number of frames in the grid
    pub fn frame_count(&self) -> usize {
        usize::try_from(u64::from(self.rows) * u64::from(self.cols)).unwrap_or(usize::MAX)
    }

    /// Right margin, mirroring the left margin when unset
    pub fn resolved_margin_right(&self) -> f64 {
        self.x_margin_right.unwrap_or(self.x_margin_left)
    }

    /// Bottom margin, mirroring the top margin when unset
    pub fn resolved_margin_bottom(&self) -> f64 {
        self.y_margin_bottom.unwrap_or(self.y_margin_top)
    }

    /// Size of a single frame on a sheet of the given dimensions.
    ///
    /// The result may be fractional; it is not rounded.
    pub fn frame_size(&self, sheet_width: u32, sheet_height: u32) -> (f64, f64) {
        let cols = f64::from(self.cols);
        let rows = f64::from(self.rows);

        let width = (f64::from(sheet_width)
            - (self.x_margin_left + self.resolved_margin_right())
            - (cols - 1.0) * self.x_padding)
            / cols;
        let height = (f64::from(sheet_height)
            - (self.y_margin_top + self.resolved_margin_bottom())
            - (rows - 1.0) * self.y_padding)
            / rows;

        (width, height)
    }

    /// Frame rectangles in row-major order (row 0 left to right, then row 1, ...)
    pub fn rects(&self, sheet_width: u32, sheet_height: u32) -> Vec<Rect> {
        let (width, height) = self.frame_size(sheet_width, sheet_height);

        let mut rects = Vec::with_capacity(self.frame_count());
        for row in 0..self.rows {
            for col in 0..self.cols {
                let x = self.x_margin_left + f64::from(col) * (width + self.x_padding);
                let y = self.y_margin_top + f64::from(row) * (height + self.y_padding);
                rects.push(Rect::new(x, y, width, height));
            }
        }

        rects
    }
}
