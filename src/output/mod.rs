mod format;
mod json;

use std::path::{Path, PathBuf};

use anyhow::Result;
use log::debug;
use rayon::prelude::*;

use crate::cli::CompressionLevel;
use crate::sheet::Frame;

pub use format::save_frame_image;
pub use json::{FrameEntry, Size, write_metadata};

/// Filename for the frame at `index`
pub fn frame_png_filename(base_name: &str, index: usize) -> String {
    format!("{}_{}.png", base_name, index)
}

/// Write every frame as `<base_name>_<index>.png` into `output_dir`.
///
/// Returns the written paths in frame order.
pub fn write_frames(
    frames: &[Frame],
    output_dir: &Path,
    base_name: &str,
    compress: Option<CompressionLevel>,
) -> Result<Vec<PathBuf>> {
    frames
        .par_iter()
        .enumerate()
        .map(|(index, frame)| -> Result<PathBuf> {
            let path = output_dir.join(frame_png_filename(base_name, index));
            save_frame_image(frame, &path, compress)?;
            debug!("Saved {}", path.display());
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_frame_png_filename() {
        assert_eq!(frame_png_filename("hero", 0), "hero_0.png");
        assert_eq!(frame_png_filename("hero_walk", 12), "hero_walk_12.png");
    }

    #[test]
    fn test_write_frames_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let frames: Vec<Frame> = (0..3u8)
            .map(|i| Frame::new(RgbImage::from_pixel(2, 2, Rgb([i, 0, 0]))))
            .collect();

        let paths = write_frames(&frames, dir.path(), "f", None).unwrap();

        assert_eq!(paths.len(), 3);
        for (i, path) in paths.iter().enumerate() {
            assert_eq!(*path, dir.path().join(format!("f_{}.png", i)));
            let img = image::open(path).unwrap().into_rgba8();
            assert_eq!(img.get_pixel(0, 0)[0], u8::try_from(i).unwrap());
        }
    }
}
