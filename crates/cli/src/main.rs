//! Trace-driven cache hierarchy simulator CLI.
//!
//! This binary replays a recorded memory-access trace through a configurable
//! cache hierarchy and prints per-level hit/miss statistics. It performs:
//! 1. **Configuration:** the built-in reference hierarchy, or a JSON file
//!    supplied with `--config`, validated before anything is allocated.
//! 2. **Replay:** streams the binary trace through the L1I/L1D/L2 hierarchy.
//! 3. **Report:** per-level counters and hit rates plus the executed event
//!    count. Exit code is zero on a completed run, non-zero on any error.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cachesim_core::config::Config;
use cachesim_core::hierarchy::Hierarchy;
use cachesim_core::sim::driver;
use cachesim_core::sim::trace::TraceReader;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    version,
    about = "Trace-driven multi-level cache hierarchy simulator",
    long_about = "Replays a recorded memory-access trace through a configurable \
L1I/L1D/L2 cache hierarchy and reports per-level hit rates.\n\nExamples:\n  \
cachesim traces/gcc.tr\n  cachesim traces/gcc.tr --config hierarchy.json\n  \
cachesim traces/sparc.tr --big-endian"
)]
struct Cli {
    /// Binary trace file of 16-byte access records.
    trace: PathBuf,

    /// JSON hierarchy configuration; defaults to the built-in reference
    /// hierarchy.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Byte-swap addr/time fields (trace captured on a big-endian host).
    #[arg(long)]
    big_endian: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => load_config(&path),
        None => Config::default(),
    };

    let mut hierarchy = Hierarchy::new(&config).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: invalid configuration: {e}");
        process::exit(1);
    });

    let file = File::open(&cli.trace).unwrap_or_else(|e| {
        eprintln!(
            "[!] FATAL: could not open trace '{}': {e}",
            cli.trace.display()
        );
        process::exit(1);
    });
    let stream = BufReader::new(file);
    let reader = if cli.big_endian {
        TraceReader::big_endian(stream)
    } else {
        TraceReader::new(stream)
    };

    match driver::run(&mut hierarchy, reader) {
        Ok(summary) => {
            if summary.ignored > 0 {
                eprintln!("[*] skipped {} non-memory records", summary.ignored);
            }
            hierarchy.report().print();
        }
        Err(e) => {
            eprintln!("[!] FATAL: {e}");
            process::exit(1);
        }
    }
}

/// Loads and validates a JSON configuration file.
///
/// Exits with a single descriptive line on standard error if the file
/// cannot be read or fails validation.
fn load_config(path: &Path) -> Config {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!(
            "[!] FATAL: could not read config '{}': {e}",
            path.display()
        );
        process::exit(1);
    });
    Config::from_json_str(&text).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    })
}
