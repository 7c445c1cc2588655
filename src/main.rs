use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};

use sheetcut::cli::{CliArgs, Command, CommonArgs, CompressionLevel, GridArgs, ScaleFilter};
use sheetcut::config::{CompressConfig, LayoutConfig, LoadedConfig};
use sheetcut::layout::GridLayout;
use sheetcut::output::{FrameEntry, frame_png_filename, write_frames, write_metadata};
use sheetcut::sheet::{ColorKey, SpriteSheet};

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    // Load config if specified and merge with CLI args
    let merged = merge_config_with_args(cli.command.common())?;

    let layout = match &cli.command {
        Command::Grid(args) => LayoutConfig::Grid(grid_from_args(args)),
        Command::Strip(args) => LayoutConfig::Strip {
            rect: args.rect,
            count: args.count,
        },
        Command::Rects(args) => LayoutConfig::Rects {
            rects: args.rects.clone(),
        },
        Command::Run(_) => merged
            .layout
            .clone()
            .context("`run` needs a config file with a \"layout\" section")?,
    };

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(if merged.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("Sheetcut sprite slicer v{}", env!("CARGO_PKG_VERSION"));

    // Create output directory if it doesn't exist
    if !merged.output.exists() {
        fs::create_dir_all(&merged.output)?;
    }

    if merged.sheets.is_empty() {
        anyhow::bail!("no sprite sheets to slice");
    }

    let multiple = merged.sheets.len() > 1;
    for sheet_path in &merged.sheets {
        let base_name = base_name_for(sheet_path, merged.name.as_deref(), multiple);
        slice_sheet(sheet_path, &layout, &merged, &base_name)?;
    }

    info!("Done!");

    Ok(())
}

fn slice_sheet(
    sheet_path: &Path,
    layout: &LayoutConfig,
    merged: &MergedConfig,
    base_name: &str,
) -> Result<()> {
    let sheet = SpriteSheet::open_or_exit(sheet_path, merged.alpha).with_filter(merged.filter);
    let (width, height) = sheet.dimensions();
    info!("Loaded {} ({}x{})", sheet_path.display(), width, height);

    let rects = layout.rects(width, height);
    let frames = layout.extract(&sheet, merged.color_key, merged.scale);
    debug!("Cut {} frames from {}", frames.len(), sheet_path.display());

    let paths = write_frames(&frames, &merged.output, base_name, merged.compress)
        .with_context(|| format!("failed to write frames for {}", sheet_path.display()))?;
    info!("Saved {} frames as {}_*.png", paths.len(), base_name);

    if merged.metadata {
        let entries: Vec<FrameEntry> = rects
            .iter()
            .zip(&frames)
            .enumerate()
            .map(|(index, (rect, frame))| {
                FrameEntry::new(index, frame_png_filename(base_name, index), *rect, frame)
            })
            .collect();

        let sheet_image = sheet_path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        write_metadata(&sheet_image, (width, height), &entries, &merged.output, base_name)?;
        info!("Generated {}.json", base_name);
    }

    Ok(())
}

fn grid_from_args(args: &GridArgs) -> GridLayout {
    let mut grid = GridLayout::new(args.rows, args.cols)
        .x_margin_left(args.margin_left.unwrap_or(0.0))
        .x_padding(args.padding_x.unwrap_or(0.0))
        .y_margin_top(args.margin_top.unwrap_or(0.0))
        .y_padding(args.padding_y.unwrap_or(0.0));

    if let Some(right) = args.margin_right {
        grid = grid.x_margin_right(right);
    }
    if let Some(bottom) = args.margin_bottom {
        grid = grid.y_margin_bottom(bottom);
    }

    grid
}

/// Frame file prefix for a sheet: the explicit name, the sheet's file stem,
/// or both when one name is shared by several sheets.
fn base_name_for(sheet_path: &Path, name: Option<&str>, multiple: bool) -> String {
    let stem = sheet_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frame");

    match name {
        Some(name) if multiple => format!("{}_{}", name, stem),
        Some(name) => name.to_string(),
        None => stem.to_string(),
    }
}

/// Merged configuration from CLI args and optional config file.
struct MergedConfig {
    sheets: Vec<PathBuf>,
    output: PathBuf,
    name: Option<String>,
    alpha: bool,
    layout: Option<LayoutConfig>,
    color_key: Option<ColorKey>,
    scale: u32,
    filter: ScaleFilter,
    compress: Option<CompressionLevel>,
    metadata: bool,
    verbose: bool,
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(args: &CommonArgs) -> Result<MergedConfig> {
    let loaded_config = if let Some(config_path) = &args.config {
        Some(
            LoadedConfig::load(config_path)
                .with_context(|| format!("failed to load config: {}", config_path.display()))?,
        )
    } else {
        None
    };

    // Determine sheets: CLI args override config
    let sheets = if !args.sheets.is_empty() {
        args.sheets.clone()
    } else if let Some(ref lc) = loaded_config {
        lc.sheet_paths()
            .context("failed to resolve input sheets from config")?
    } else {
        // This shouldn't happen due to clap's required_unless_present
        Vec::new()
    };

    // Determine output directory: CLI > config > default
    let output = args.output.clone().unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(LoadedConfig::output_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    let name = args.name.clone().or_else(|| {
        loaded_config
            .as_ref()
            .and_then(|lc| lc.config.name.clone())
    });

    // Boolean flags: CLI presence sets them to true, otherwise use config
    let alpha = args.alpha || loaded_config.as_ref().is_some_and(|lc| lc.config.alpha);
    let metadata = args.metadata || loaded_config.as_ref().is_some_and(|lc| lc.config.metadata);

    // Verbose is CLI-only
    let verbose = args.verbose;

    let layout = loaded_config.as_ref().and_then(|lc| lc.config.layout.clone());

    let color_key = args
        .color_key
        .or_else(|| loaded_config.as_ref().and_then(|lc| lc.config.color_key));

    let scale = args.scale.unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(|lc| lc.config.scale.max(1))
            .unwrap_or(1)
    });

    // Filter: CLI > config > default
    let filter = if let Some(f) = args.filter {
        f
    } else if let Some(ref lc) = loaded_config {
        ScaleFilter::from_str(&lc.config.filter, true).map_err(|_e| {
            anyhow::anyhow!(
                "unknown filter '{}' in config file. Valid values: nearest, triangle, \
                 catmull-rom, gaussian, lanczos3",
                lc.config.filter
            )
        })?
    } else {
        ScaleFilter::default()
    };

    // Compress: CLI option overrides config
    let compress = if args.compress.is_some() {
        args.compress
    } else if let Some(ref lc) = loaded_config {
        lc.config.compress.as_ref().map(|c| match c {
            CompressConfig::Level(n) => CompressionLevel::Level(*n),
            CompressConfig::Max(_) => CompressionLevel::Max,
        })
    } else {
        None
    };

    Ok(MergedConfig {
        sheets,
        output,
        name,
        alpha,
        layout,
        color_key,
        scale,
        filter,
        compress,
        metadata,
        verbose,
    })
}
