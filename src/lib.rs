pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod output;
pub mod sheet;

pub use cli::{CliArgs, Command, CommonArgs, ScaleFilter};
pub use error::SheetError;
pub use layout::{GridLayout, PixelRect, Rect, strip_rects};
pub use sheet::{ColorKey, Frame, SpriteSheet};
