use image::{DynamicImage, RgbImage, Rgba, RgbaImage, imageops};
use log::debug;

use super::{ColorKey, Frame, SpriteSheet, scale_by_factor};
use crate::layout::{GridLayout, PixelRect, Rect, strip_rects};

impl SpriteSheet {
    /// Cut one frame out of the sheet.
    ///
    /// The frame is always `rect`'s size; any part of `rect` outside the sheet
    /// stays black. A `scale` of 1 returns the frame unscaled.
    pub fn image_at(&self, rect: Rect, color_key: Option<ColorKey>, scale: u32) -> Frame {
        let px = rect.to_pixels();
        if !px.fits_within(self.width(), self.height()) {
            debug!(
                "Frame rect {:?} extends past {}x{} sheet, clipping",
                px,
                self.width(),
                self.height()
            );
        }

        let mut frame = Frame::new(self.copy_region(px));

        if let Some(key) = color_key {
            frame.set_color_key(key.resolve(frame.image()));
        }

        let filter = self.filter;
        frame.map_image(|img| scale_by_factor(img, scale, filter))
    }

    /// Cut one frame per rectangle, in the same order
    pub fn images_at(&self, rects: &[Rect], color_key: Option<ColorKey>, scale: u32) -> Vec<Frame> {
        rects
            .iter()
            .map(|rect| self.image_at(*rect, color_key, scale))
            .collect()
    }

    /// Cut `count` contiguous frames starting at `first` and running right
    pub fn load_strip(&self, first: Rect, count: usize, color_key: Option<ColorKey>) -> Vec<Frame> {
        self.images_at(&strip_rects(first, count), color_key, 1)
    }

    /// Cut every cell of a uniform grid, row by row
    pub fn load_grid_images(
        &self,
        grid: &GridLayout,
        color_key: Option<ColorKey>,
        scale: u32,
    ) -> Vec<Frame> {
        let rects = grid.rects(self.width(), self.height());
        debug!(
            "Grid {}x{} yields {} frames of {:?}",
            grid.rows,
            grid.cols,
            rects.len(),
            grid.frame_size(self.width(), self.height())
        );
        self.images_at(&rects, color_key, scale)
    }

    /// Copy `px` onto a fresh black opaque surface.
    ///
    /// Sheet alpha is blended over the black; anything outside the sheet is
    /// clipped by `overlay`.
    fn copy_region(&self, px: PixelRect) -> RgbImage {
        let mut canvas = RgbaImage::from_pixel(px.width, px.height, Rgba([0, 0, 0, 255]));
        imageops::overlay(
            &mut canvas,
            &self.image,
            -i64::from(px.x),
            -i64::from(px.y),
        );
        DynamicImage::ImageRgba8(canvas).into_rgb8()
    }
}
