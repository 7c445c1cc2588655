use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// An extracted frame: an opaque pixel copy plus an optional transparent colour.
///
/// Frames own their pixels and keep no link back to the sheet they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    image: RgbImage,
    color_key: Option<Rgb<u8>>,
}

impl Frame {
    pub fn new(image: RgbImage) -> Self {
        Self {
            image,
            color_key: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Opaque pixel data, without the colour key applied
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn color_key(&self) -> Option<Rgb<u8>> {
        self.color_key
    }

    pub fn set_color_key(&mut self, key: Option<Rgb<u8>>) {
        self.color_key = key;
    }

    /// Replace the pixel data, keeping the colour key
    pub(crate) fn map_image(self, f: impl FnOnce(RgbImage) -> RgbImage) -> Self {
        Self {
            image: f(self.image),
            color_key: self.color_key,
        }
    }

    /// Whether the pixel at (x, y) would be dropped during composition
    pub fn is_transparent_at(&self, x: u32, y: u32) -> bool {
        match (self.color_key, self.image.get_pixel_checked(x, y)) {
            (Some(key), Some(pixel)) => *pixel == key,
            _ => false,
        }
    }

    /// Composite-ready RGBA copy: key-coloured pixels get alpha 0, all others 255
    pub fn to_rgba(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            let Rgb([r, g, b]) = *self.image.get_pixel(x, y);
            let alpha = if Some(Rgb([r, g, b])) == self.color_key {
                0
            } else {
                255
            };
            Rgba([r, g, b, alpha])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rgba_without_key_is_opaque() {
        let frame = Frame::new(RgbImage::from_pixel(3, 2, Rgb([0, 0, 0])));
        let rgba = frame.to_rgba();

        assert_eq!(rgba.dimensions(), (3, 2));
        assert!(rgba.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_to_rgba_applies_exact_key() {
        let mut image = RgbImage::from_pixel(2, 1, Rgb([255, 0, 255]));
        image.put_pixel(1, 0, Rgb([254, 0, 255]));
        let mut frame = Frame::new(image);
        frame.set_color_key(Some(Rgb([255, 0, 255])));

        let rgba = frame.to_rgba();
        assert_eq!(*rgba.get_pixel(0, 0), Rgba([255, 0, 255, 0]));
        assert_eq!(*rgba.get_pixel(1, 0), Rgba([254, 0, 255, 255]));
        assert!(frame.is_transparent_at(0, 0));
        assert!(!frame.is_transparent_at(1, 0));
        assert!(!frame.is_transparent_at(5, 5));
    }
}
