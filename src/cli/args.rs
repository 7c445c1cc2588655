use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::layout::Rect;
use crate::sheet::ColorKey;

#[derive(Parser, Debug)]
#[command(name = "sheetcut")]
#[command(version, about = "Sprite sheet slicer", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Cut a uniform grid of frames
    Grid(GridArgs),
    /// Cut contiguous frames running left to right from a first frame
    Strip(StripArgs),
    /// Cut explicit rectangles
    Rects(RectsArgs),
    /// Cut frames using the layout from a config file
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GridArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Number of frame rows
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub rows: u32,

    /// Number of frame columns
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub cols: u32,

    /// Space before the first column [default: 0]
    #[arg(long, value_name = "PIXELS")]
    pub margin_left: Option<f64>,

    /// Space after the last column [default: same as --margin-left]
    #[arg(long, value_name = "PIXELS")]
    pub margin_right: Option<f64>,

    /// Space between columns [default: 0]
    #[arg(long, value_name = "PIXELS")]
    pub padding_x: Option<f64>,

    /// Space above the first row [default: 0]
    #[arg(long, value_name = "PIXELS")]
    pub margin_top: Option<f64>,

    /// Space below the last row [default: same as --margin-top]
    #[arg(long, value_name = "PIXELS")]
    pub margin_bottom: Option<f64>,

    /// Space between rows [default: 0]
    #[arg(long, value_name = "PIXELS")]
    pub padding_y: Option<f64>,
}

#[derive(Args, Debug, Clone)]
pub struct StripArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// First frame as x,y,w,h
    #[arg(long, value_name = "X,Y,W,H")]
    pub rect: Rect,

    /// Number of frames in the strip
    #[arg(long)]
    pub count: usize,
}

#[derive(Args, Debug, Clone)]
pub struct RectsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Frame rectangle as x,y,w,h (repeatable, output keeps this order)
    #[arg(long = "rect", value_name = "X,Y,W,H", required = true)]
    pub rects: Vec<Rect>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Sprite sheet image files
    #[arg(required_unless_present = "config")]
    pub sheets: Vec<PathBuf>,

    /// Load settings from a JSON config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory for frame files [default: .]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Base name for frame files (<name>_0.png, ...) [default: sheet file stem]
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Keep the sheet's alpha channel instead of flattening it
    #[arg(long)]
    pub alpha: bool,

    /// Transparent colour: black, auto, #rrggbb or r,g,b
    #[arg(short = 'k', long, value_name = "KEY")]
    pub color_key: Option<ColorKey>,

    /// Integer scale factor for every frame [default: 1]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: Option<u32>,

    /// Resampling filter used when scaling [default: nearest]
    #[arg(long, value_enum)]
    pub filter: Option<ScaleFilter>,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Also write <name>.json describing every frame
    #[arg(long)]
    pub metadata: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Command {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Command::Grid(args) => &args.common,
            Command::Strip(args) => &args.common,
            Command::Rects(args) => &args.common,
            Command::Run(args) => &args.common,
        }
    }
}

/// Resampling filter for scaled frames
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq, Hash)]
pub enum ScaleFilter {
    /// Nearest neighbor (best for pixel art)
    #[default]
    #[value(name = "nearest")]
    Nearest,
    /// Bilinear interpolation
    #[value(name = "triangle")]
    Triangle,
    /// Cubic interpolation (bicubic)
    #[value(name = "catmull-rom", alias = "bicubic")]
    CatmullRom,
    /// Gaussian filter
    #[value(name = "gaussian")]
    Gaussian,
    /// Lanczos with window 3
    #[value(name = "lanczos3")]
    Lanczos3,
}

impl ScaleFilter {
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ScaleFilter::Nearest => image::imageops::FilterType::Nearest,
            ScaleFilter::Triangle => image::imageops::FilterType::Triangle,
            ScaleFilter::CatmullRom => image::imageops::FilterType::CatmullRom,
            ScaleFilter::Gaussian => image::imageops::FilterType::Gaussian,
            ScaleFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grid_command() {
        let cli = CliArgs::try_parse_from([
            "sheetcut",
            "grid",
            "hero.png",
            "--rows",
            "2",
            "--cols",
            "4",
            "--padding-x",
            "1.5",
            "--color-key",
            "auto",
            "--scale",
            "3",
        ])
        .unwrap();

        let Command::Grid(args) = cli.command else {
            panic!("expected grid command");
        };
        assert_eq!(args.rows, 2);
        assert_eq!(args.cols, 4);
        assert_eq!(args.padding_x, Some(1.5));
        assert_eq!(args.margin_right, None);
        assert_eq!(args.common.color_key, Some(ColorKey::AutoFromOrigin));
        assert_eq!(args.common.scale, Some(3));
        assert_eq!(args.common.sheets, vec![PathBuf::from("hero.png")]);
    }

    #[test]
    fn test_grid_rejects_zero_rows() {
        let result =
            CliArgs::try_parse_from(["sheetcut", "grid", "hero.png", "--rows", "0", "--cols", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rects_keeps_order() {
        let cli = CliArgs::try_parse_from([
            "sheetcut",
            "rects",
            "hero.png",
            "--rect",
            "16,0,16,16",
            "--rect",
            "0,0,16,16",
        ])
        .unwrap();

        let Command::Rects(args) = cli.command else {
            panic!("expected rects command");
        };
        assert_eq!(args.rects[0], Rect::new(16.0, 0.0, 16.0, 16.0));
        assert_eq!(args.rects[1], Rect::new(0.0, 0.0, 16.0, 16.0));
    }

    #[test]
    fn test_run_requires_config_or_sheet() {
        assert!(CliArgs::try_parse_from(["sheetcut", "run"]).is_err());
        assert!(CliArgs::try_parse_from(["sheetcut", "run", "-c", "hero.json"]).is_ok());
    }

    #[test]
    fn test_compression_level_parse() {
        assert_eq!("max".parse::<CompressionLevel>(), Ok(CompressionLevel::Max));
        assert_eq!("4".parse::<CompressionLevel>(), Ok(CompressionLevel::Level(4)));
        assert!("7".parse::<CompressionLevel>().is_err());
    }
}
