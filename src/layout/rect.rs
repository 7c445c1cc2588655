use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// A frame bounding box in sheet coordinates.
///
/// Coordinates are fractional so grid arithmetic can be carried without
/// rounding; they are only snapped to pixels when a frame is extracted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A rectangle snapped to whole pixels, as used for copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Same size, moved by (dx, dy)
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Snap to pixel addressing by truncating toward zero.
    ///
    /// Negative extents collapse to an empty rectangle.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "truncation is the pixel addressing policy"
    )]
    pub fn to_pixels(&self) -> PixelRect {
        PixelRect {
            x: self.x as i32,
            y: self.y as i32,
            width: self.width.max(0.0) as u32,
            height: self.height.max(0.0) as u32,
        }
    }
}

impl From<(u32, u32, u32, u32)> for Rect {
    fn from((x, y, width, height): (u32, u32, u32, u32)) -> Self {
        Self::new(
            f64::from(x),
            f64::from(y),
            f64::from(width),
            f64::from(height),
        )
    }
}

impl FromStr for Rect {
    type Err = SheetError;

    /// Parse `x,y,w,h` (whitespace around parts is ignored)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_e| SheetError::InvalidRect(s.to_string()))?;

        match parts.as_slice() {
            [x, y, w, h] => Ok(Rect::new(*x, *y, *w, *h)),
            _ => Err(SheetError::InvalidRect(s.to_string())),
        }
    }
}

impl PixelRect {
    /// Check if this rectangle lies entirely inside a `width` x `height` image
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && i64::from(self.x) + i64::from(self.width) <= i64::from(width)
            && i64::from(self.y) + i64::from(self.height) <= i64::from(height)
    }
}
