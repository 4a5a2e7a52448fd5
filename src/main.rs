//! # Platformer Engine Entry Point
//!
//! Runs a headless session of the engine from the command line: generate or
//! load a world, simulate it for a number of ticks, and optionally export it.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- --ticks 600 --save-dir save --export exports
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use platformer_engine::{run, RunOptions};

/// Headless runner for the platformer engine
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON engine configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// World seed, overriding the configuration
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Directory to autosave into and load from
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Directory to export the final world into
    #[arg(long)]
    export: Option<PathBuf>,

    /// Keep walking right for the whole session
    #[arg(long)]
    walk_right: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let options = RunOptions {
        config_path: args.config,
        seed: args.seed,
        ticks: args.ticks,
        save_dir: args.save_dir,
        export_dir: args.export,
        walk_right: args.walk_right,
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
