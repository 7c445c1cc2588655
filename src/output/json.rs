use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::error::SheetError;
use crate::layout::{PixelRect, Rect};
use crate::sheet::Frame;

#[derive(Serialize)]
struct JsonOutput<'a> {
    meta: Meta,
    sheet: JsonSheet,
    frames: &'a [FrameEntry],
}

#[derive(Serialize)]
struct Meta {
    app: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct JsonSheet {
    image: String,
    size: Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

/// One written frame and where it came from on the sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameEntry {
    pub index: usize,
    pub image: String,
    /// Layout rectangle before pixel snapping
    pub source_rect: Rect,
    /// Pixels actually copied from
    pub frame: PixelRect,
    /// Output size after scaling
    pub size: Size,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_key: Option<String>,
}

impl FrameEntry {
    pub fn new(index: usize, image: String, rect: Rect, frame: &Frame) -> Self {
        Self {
            index,
            image,
            source_rect: rect,
            frame: rect.to_pixels(),
            size: Size {
                w: frame.width(),
                h: frame.height(),
            },
            color_key: frame
                .color_key()
                .map(|c| format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2])),
        }
    }
}

/// Write `<base_name>.json` describing a sliced sheet
pub fn write_metadata(
    sheet_image: &str,
    sheet_size: (u32, u32),
    frames: &[FrameEntry],
    output_dir: &Path,
    base_name: &str,
) -> Result<()> {
    let output = JsonOutput {
        meta: Meta {
            app: "sheetcut",
            version: env!("CARGO_PKG_VERSION"),
        },
        sheet: JsonSheet {
            image: sheet_image.to_string(),
            size: Size {
                w: sheet_size.0,
                h: sheet_size.1,
            },
        },
        frames,
    };

    let json_path = output_dir.join(format!("{}.json", base_name));
    let content = serde_json::to_string_pretty(&output)?;

    fs::write(&json_path, content).map_err(|e| SheetError::OutputWrite {
        path: json_path,
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_write_metadata() {
        let dir = tempfile::tempdir().unwrap();

        let mut frame = Frame::new(RgbImage::new(60, 64));
        frame.set_color_key(Some(Rgb([255, 0, 128])));
        let entry = FrameEntry::new(1, "hero_1.png".to_string(), Rect::new(34.0, 0.0, 30.0, 32.0), &frame);

        write_metadata("hero.png", (64, 32), &[entry], dir.path(), "hero").unwrap();

        let content = fs::read_to_string(dir.path().join("hero.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(json["meta"]["app"], "sheetcut");
        assert_eq!(json["sheet"]["size"]["w"], 64);
        let frame = &json["frames"][0];
        assert_eq!(frame["index"], 1);
        assert_eq!(frame["image"], "hero_1.png");
        assert_eq!(frame["sourceRect"]["x"], 34.0);
        assert_eq!(frame["frame"]["width"], 30);
        assert_eq!(frame["size"]["w"], 60);
        assert_eq!(frame["colorKey"], "#ff0080");
    }

    #[test]
    fn test_entry_without_key_omits_field() {
        let frame = Frame::new(RgbImage::new(4, 4));
        let entry = FrameEntry::new(0, "a_0.png".to_string(), Rect::new(0.0, 0.0, 4.0, 4.0), &frame);

        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("colorKey").is_none());
    }
}
