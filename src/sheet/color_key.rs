use std::fmt;
use std::str::FromStr;

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// Colour treated as transparent when a frame is composited.
///
/// Matching is exact; there is no tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorKey {
    /// Pure black, (0, 0, 0)
    Black,
    /// Whatever colour sits at the frame's local (0, 0)
    AutoFromOrigin,
    /// A literal colour
    Explicit(Rgb<u8>),
}

impl ColorKey {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorKey::Explicit(Rgb([r, g, b]))
    }

    /// Resolve to a concrete colour against an extracted frame.
    ///
    /// `AutoFromOrigin` samples the frame, not the sheet. An empty frame has
    /// no origin pixel and resolves to `None`.
    pub fn resolve(&self, frame: &RgbImage) -> Option<Rgb<u8>> {
        match self {
            ColorKey::Black => Some(Rgb([0, 0, 0])),
            ColorKey::AutoFromOrigin => frame.get_pixel_checked(0, 0).copied(),
            ColorKey::Explicit(color) => Some(*color),
        }
    }
}

impl FromStr for ColorKey {
    type Err = SheetError;

    /// Accepts `black`, `auto`, `#rrggbb` or `r,g,b`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SheetError::InvalidColorKey(s.to_string());
        let trimmed = s.trim();

        if trimmed.eq_ignore_ascii_case("black") {
            return Ok(ColorKey::Black);
        }
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(ColorKey::AutoFromOrigin);
        }

        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_e| invalid());
            return Ok(ColorKey::rgb(channel(0)?, channel(2)?, channel(4)?));
        }

        let channels: Vec<u8> = trimmed
            .split(',')
            .map(|c| c.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .map_err(|_e| invalid())?;

        match channels.as_slice() {
            [r, g, b] => Ok(ColorKey::rgb(*r, *g, *b)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorKey::Black => write!(f, "black"),
            ColorKey::AutoFromOrigin => write!(f, "auto"),
            ColorKey::Explicit(Rgb([r, g, b])) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
        }
    }
}

impl TryFrom<String> for ColorKey {
    type Error = SheetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorKey> for String {
    fn from(key: ColorKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords() {
        assert_eq!("black".parse::<ColorKey>().unwrap(), ColorKey::Black);
        assert_eq!("AUTO".parse::<ColorKey>().unwrap(), ColorKey::AutoFromOrigin);
    }

    #[test]
    fn test_parse_hex_and_triple() {
        assert_eq!(
            "#ff00a0".parse::<ColorKey>().unwrap(),
            ColorKey::rgb(255, 0, 160)
        );
        assert_eq!(
            "255, 0, 255".parse::<ColorKey>().unwrap(),
            ColorKey::rgb(255, 0, 255)
        );
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "#fff", "#gggggg", "1,2", "1,2,300", "magenta"] {
            assert!(input.parse::<ColorKey>().is_err(), "{input} should not parse");
        }
    }

    #[test]
    fn test_black_ignores_frame_contents() {
        let frame = RgbImage::from_pixel(4, 4, Rgb([200, 10, 10]));
        assert_eq!(ColorKey::Black.resolve(&frame), Some(Rgb([0, 0, 0])));
    }

    #[test]
    fn test_auto_samples_origin() {
        let mut frame = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        frame.put_pixel(0, 0, Rgb([255, 0, 255]));

        assert_eq!(
            ColorKey::AutoFromOrigin.resolve(&frame),
            Some(Rgb([255, 0, 255]))
        );
    }

    #[test]
    fn test_auto_on_empty_frame() {
        let frame = RgbImage::new(0, 0);
        assert_eq!(ColorKey::AutoFromOrigin.resolve(&frame), None);
    }

    #[test]
    fn test_serde_as_string() {
        let key: ColorKey = serde_json::from_str(r##""#00ff00""##).unwrap();
        assert_eq!(key, ColorKey::rgb(0, 255, 0));
        assert_eq!(serde_json::to_string(&key).unwrap(), r##""#00ff00""##);
    }
}
