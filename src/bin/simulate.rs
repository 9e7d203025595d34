//! Contract generation simulation CLI.
//!
//! Runs many independent generation trials on the standard map, prints a
//! summary of outcomes and rewards, and optionally writes every generated
//! contract as JSONL.
//!
//! Usage:
//!   cargo run --release --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --trials N      Number of trials (default: 1000)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --config FILE   Generation config JSON (default: built-in rules)
//!   --output FILE   Output file path for JSONL records (default: none)
//!   --quiet         Suppress progress and summary output
//!
//! Library diagnostics go to stderr, filtered by `RUST_LOG` (default: warn).

use std::env;
use std::fs::{self, File};
use std::io::BufWriter;
use std::process;
use std::str::FromStr;
use std::time::Instant;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use freightline::config::GenerationConfig;
use freightline::simulate::{self, SimulationConfig};

/// Routes the library's `log` records to stderr.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|s| s.parse()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid {} value", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn main() {
    init_logging();
    let args: Vec<String> = env::args().collect();
    let mut config = SimulationConfig::default();
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--trials" => {
                i += 1;
                config.trials = parse_value(&args, i, "--trials");
            }
            "--threads" => {
                i += 1;
                config.threads = parse_value(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = parse_value(&args, i, "--seed");
            }
            "--config" => {
                i += 1;
                let path: String = parse_value(&args, i, "--config");
                config.generation = match fs::read_to_string(&path)
                    .map_err(|e| e.to_string())
                    .and_then(|text| GenerationConfig::from_json(&text).map_err(|e| e.to_string()))
                {
                    Ok(c) => c,
                    Err(e) => {
                        eprintln!("failed to load config {}: {}", path, e);
                        process::exit(1);
                    }
                };
            }
            "--output" => {
                i += 1;
                output_path = Some(parse_value(&args, i, "--output"));
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    config.quiet = quiet;

    if !quiet {
        eprintln!(
            "Simulate: {} trials, {} threads, seed {}",
            config.trials, config.threads, config.seed
        );
    }

    let start = Instant::now();
    let report = simulate::run_simulation(&config);
    let elapsed = start.elapsed();

    if !quiet {
        eprintln!(
            "Completed {} trials in {:.2}s",
            report.trials,
            elapsed.as_secs_f64()
        );
        simulate::print_summary(&report);
        if report.unexpected_failures() > 0 {
            eprintln!(
                "WARNING: {} market contracts had no distant commodity",
                report.unexpected_failures()
            );
        }
    }

    if let Some(path) = output_path {
        let written = File::create(&path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            simulate::write_jsonl(&report.records, &mut writer)
        });
        match written {
            Ok(()) => {
                if !quiet {
                    eprintln!("Wrote {} contracts to {}", report.records.len(), path);
                }
            }
            Err(e) => {
                eprintln!("failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
    }
}

fn print_usage() {
    eprintln!("Usage: simulate [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --trials N       Number of trials (default: 1000)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --config FILE    Generation config JSON (default: built-in rules)");
    eprintln!("  --output FILE    Output file path for JSONL records (default: none)");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=freightline=debug) for library diagnostics.");
}
