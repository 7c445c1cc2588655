use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::Result;
use image::ImageFormat;

use crate::cli::CompressionLevel;
use crate::error::SheetError;
use crate::sheet::Frame;

/// Save a frame as RGBA PNG with its colour key applied, optionally compressed
pub fn save_frame_image(
    frame: &Frame,
    path: &Path,
    compress: Option<CompressionLevel>,
) -> Result<()> {
    // Encode to PNG in memory
    let mut png_data = Cursor::new(Vec::new());
    frame
        .to_rgba()
        .write_to(&mut png_data, ImageFormat::Png)
        .map_err(|e| SheetError::ImageSave {
            path: path.to_path_buf(),
            source: e,
        })?;

    let output_data = if let Some(level) = compress {
        let opts = match level {
            CompressionLevel::Level(n) => oxipng::Options::from_preset(n),
            CompressionLevel::Max => oxipng::Options::max_compression(),
        };
        oxipng::optimize_from_memory(&png_data.into_inner(), &opts).map_err(|e| {
            SheetError::PngCompress {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?
    } else {
        png_data.into_inner()
    };

    fs::write(path, output_data).map_err(|e| SheetError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba};

    #[test]
    fn test_saved_frame_has_key_transparency() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        let mut img = RgbImage::from_pixel(2, 1, Rgb([255, 0, 255]));
        img.put_pixel(1, 0, Rgb([10, 20, 30]));
        let mut frame = Frame::new(img);
        frame.set_color_key(Some(Rgb([255, 0, 255])));

        save_frame_image(&frame, &path, None).unwrap();

        let saved = image::open(&path).unwrap().into_rgba8();
        assert_eq!(*saved.get_pixel(0, 0), Rgba([255, 0, 255, 0]));
        assert_eq!(*saved.get_pixel(1, 0), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_compressed_frame_round_trips_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let frame = Frame::new(RgbImage::from_pixel(8, 8, Rgb([40, 80, 120])));

        save_frame_image(&frame, &path, Some(CompressionLevel::Level(1))).unwrap();

        let saved = image::open(&path).unwrap().into_rgba8();
        assert_eq!(saved.dimensions(), (8, 8));
        assert!(saved.pixels().all(|p| *p == Rgba([40, 80, 120, 255])));
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("frame.png");
        let frame = Frame::new(RgbImage::new(1, 1));

        let err = save_frame_image(&frame, &path, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SheetError>(),
            Some(SheetError::OutputWrite { .. })
        ));
    }
}
