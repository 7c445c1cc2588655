use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader, RgbaImage};
use log::{debug, error};

use crate::cli::ScaleFilter;
use crate::error::SheetError;

/// A decoded sprite sheet that frames are cut from.
///
/// The sheet is read-only once constructed; every extraction copies pixels
/// out of it.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub(super) image: RgbaImage,
    pub(super) path: Option<PathBuf>,
    pub(super) filter: ScaleFilter,
}

impl SpriteSheet {
    /// Decode the sheet at `path`.
    ///
    /// With `needs_alpha` the alpha channel is kept; otherwise the sheet is
    /// flattened to opaque pixels.
    pub fn open(path: impl AsRef<Path>, needs_alpha: bool) -> Result<Self, SheetError> {
        let path = path.as_ref();
        let img = ImageReader::open(path)
            .map_err(|e| SheetError::ImageLoad {
                path: path.to_path_buf(),
                source: e.into(),
            })?
            .with_guessed_format()
            .map_err(|e| SheetError::ImageLoad {
                path: path.to_path_buf(),
                source: e.into(),
            })?
            .decode()
            .map_err(|e| SheetError::ImageLoad {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut sheet = Self::from_image(img, needs_alpha);
        sheet.path = Some(path.to_path_buf());
        debug!(
            "Loaded sheet {} ({}x{}, alpha: {})",
            path.display(),
            sheet.width(),
            sheet.height(),
            needs_alpha
        );

        Ok(sheet)
    }

    /// Like [`SpriteSheet::open`], but a sheet that cannot be decoded ends the
    /// process with a diagnostic naming the file.
    #[allow(clippy::print_stderr)]
    pub fn open_or_exit(path: impl AsRef<Path>, needs_alpha: bool) -> Self {
        let path = path.as_ref();
        match Self::open(path, needs_alpha) {
            Ok(sheet) => sheet,
            Err(e) => {
                error!("{}", e);
                eprintln!("{}", load_failure_message(path));
                std::process::exit(1);
            }
        }
    }

    /// Wrap an already decoded image
    pub fn from_image(img: DynamicImage, needs_alpha: bool) -> Self {
        let image = if needs_alpha {
            img.into_rgba8()
        } else {
            DynamicImage::ImageRgb8(img.into_rgb8()).into_rgba8()
        };

        Self {
            image,
            path: None,
            filter: ScaleFilter::default(),
        }
    }

    /// Use a different resampling filter for scaled extraction
    pub fn with_filter(mut self, filter: ScaleFilter) -> Self {
        self.filter = filter;
        self
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

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// File the sheet was decoded from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn filter(&self) -> ScaleFilter {
        self.filter
    }
}

/// Last line printed before giving up on an unreadable sheet
pub(crate) fn load_failure_message(path: &Path) -> String {
    format!("Unable to load sprite sheet image: {}", path.display())
}
