use serde::{Deserialize, Serialize};

use crate::layout::{GridLayout, Rect, strip_rects};
use crate::sheet::{ColorKey, Frame, SpriteSheet};

/// How frames are laid out on the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayoutConfig {
    /// Uniform rows and columns with optional margins and padding
    Grid(GridLayout),
    /// `count` contiguous frames starting at `rect`
    Strip { rect: Rect, count: usize },
    /// Explicit frame rectangles, extracted in list order
    Rects { rects: Vec<Rect> },
}

impl LayoutConfig {
    /// Frame rectangles this layout produces on a sheet of the given size
    pub fn rects(&self, sheet_width: u32, sheet_height: u32) -> Vec<Rect> {
        match self {
            LayoutConfig::Grid(grid) => grid.rects(sheet_width, sheet_height),
            LayoutConfig::Strip { rect, count } => strip_rects(*rect, *count),
            LayoutConfig::Rects { rects } => rects.clone(),
        }
    }

    /// Cut this layout's frames out of `sheet`, in the order of [`LayoutConfig::rects`]
    pub fn extract(
        &self,
        sheet: &SpriteSheet,
        color_key: Option<ColorKey>,
        scale: u32,
    ) -> Vec<Frame> {
        match self {
            LayoutConfig::Grid(grid) => sheet.load_grid_images(grid, color_key, scale),
            LayoutConfig::Strip { rect, count } if scale == 1 => {
                sheet.load_strip(*rect, *count, color_key)
            }
            LayoutConfig::Strip { rect, count } => {
                sheet.images_at(&strip_rects(*rect, *count), color_key, scale)
            }
            LayoutConfig::Rects { rects } => sheet.images_at(rects, color_key, scale),
        }
    }
}

/// PNG compression level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

/// Sheetcut configuration file structure.
///
/// All paths in the config are relative to the config file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Sheet file paths or glob patterns
    pub input: Vec<String>,
    /// Output directory for frame files
    pub output_dir: String,
    /// Base name for frame files; defaults to each sheet's file stem
    pub name: Option<String>,
    /// Keep the sheet's alpha channel
    pub alpha: bool,
    /// Frame layout (required by `sheetcut run`)
    pub layout: Option<LayoutConfig>,
    /// Transparent colour: "black", "auto", "#rrggbb" or "r,g,b"
    pub color_key: Option<ColorKey>,
    /// Integer scale factor
    pub scale: u32,
    /// Scale filter (nearest, triangle, catmull-rom, gaussian, lanczos3)
    pub filter: String,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
    /// Write frame metadata JSON next to the frames
    pub metadata: bool,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            version: 1,
            input: Vec::new(),
            output_dir: ".".to_string(),
            name: None,
            alpha: false,
            layout: None,
            color_key: None,
            scale: 1,
            filter: "nearest".to_string(),
            compress: None,
            metadata: false,
        }
    }
}
