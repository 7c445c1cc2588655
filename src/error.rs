use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Unable to load sprite sheet image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save frame '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("Invalid color key '{0}' (expected black, auto, #rrggbb or r,g,b)")]
    InvalidColorKey(String),

    #[error("Invalid rectangle '{0}' (expected x,y,w,h)")]
    InvalidRect(String),

    #[error("Sheet pattern '{pattern}' matched no image files")]
    NoSheetsMatched { pattern: String },
}
