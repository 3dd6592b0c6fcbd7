use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;
use std::process::ExitCode;

use icon_header_tool::batch::{run_batch, BatchOptions};
use icon_header_tool::convert;

#[derive(Parser)]
#[command(name = "img2header")]
#[command(about = "Convert images of any size into 32x32 RGB565 C header arrays")]
#[command(version = "0.1.0")]
struct Cli {
    /// Images to convert
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Output header path (single image only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Icon name used for the array symbol (single image only)
    #[arg(short, long)]
    name: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    convert::ensure_decoders().context("Cannot start conversion")?;

    println!("Converting {} image(s) to 32x32 RGB565 headers...", cli.images.len());

    let options = BatchOptions {
        output: cli.output,
        name: cli.name,
    };
    let summary = run_batch(&cli.images, &options);

    println!("\n{}", summary.message());
    Ok(ExitCode::from(summary.exit_code()))
}
