mod args;

pub use args::{
    CliArgs, Command, CommonArgs, CompressionLevel, GridArgs, RectsArgs, RunArgs, ScaleFilter,
    StripArgs,
};
