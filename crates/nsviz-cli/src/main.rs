use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[cfg(target_env = "msvc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use nsviz::{FileConfig, Overrides, Settings, run_pipeline};
use nsviz_error::Result;

#[derive(Parser, Debug)]
#[command(
    name = "nsviz",
    about = "nsviz: namespace dependency graphs from analysis records",
    version
)]
pub struct Cli {
    /// Analysis JSON to read ('-' for stdin)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: Option<PathBuf>,

    /// Config file (defaults to ./nsviz.toml when present)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Relations to draw: 'structural' or 'call'
    #[arg(long, value_name = "MODE")]
    mode: Option<String>,

    /// Namespace segments per cluster (0 = no clusters)
    #[arg(long = "group-length", value_name = "N", allow_negative_numbers = true)]
    group_length: Option<i64>,

    /// Layout: 'standard', 'aggregation', 'none' or 'custom'
    #[arg(long, value_name = "LAYOUT")]
    layout: Option<String>,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,
}

pub fn run(args: Cli) -> Result<()> {
    let total_start = Instant::now();

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let cwd = std::env::current_dir()?;
    let file = FileConfig::discover(args.config.as_deref(), &cwd)?;
    let overrides = Overrides {
        input: args.input,
        output: args.output,
        mode: args.mode,
        group_length: args.group_length,
        layout: args.layout,
    };
    let settings = Settings::resolve(file, overrides)?;

    let dot = run_pipeline(&settings)?;
    match &settings.output {
        Some(path) => {
            std::fs::write(path, &dot)?;
            tracing::info!(path = %path.display(), "output written");
        }
        None => print!("{dot}"),
    }

    tracing::info!(total_secs = total_start.elapsed().as_secs_f64(), "complete");
    Ok(())
}

pub fn main() -> Result<()> {
    let args = Cli::parse();
    run(args)
}
