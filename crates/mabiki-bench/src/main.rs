//! mabiki-bench: CLI tool for downsampling experiments and diagnostics.
//!
//! Generates a synthetic signal, downsamples it with a configurable
//! point budget, and prints detailed diagnostics. Useful for:
//!
//! - Comparing budgets and signal shapes
//! - Measuring selection throughput on large inputs
//! - Checking extrema retention and structural invariants
//! - Exercising each input representation (records, pairs, interleaved)
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin mabiki-bench -- [OPTIONS]
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod signal;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};

use mabiki::Point;
use mabiki::diagnostics::{Clock, SampleDiagnostics, sample_with_diagnostics};
use signal::SignalKind;

/// Downsampling experimentation and diagnostics for mabiki.
///
/// Generates a synthetic signal, reduces it to the requested point
/// budget, and prints per-run timing and fidelity diagnostics.
#[derive(Parser)]
#[command(name = "mabiki-bench", version)]
struct Cli {
    /// Number of points to generate.
    #[arg(long, default_value_t = 100_000)]
    points: usize,

    /// Output point budget.
    #[arg(long, default_value_t = mabiki::DEFAULT_POINT_BUDGET)]
    budget: usize,

    /// Synthetic signal shape.
    #[arg(long, value_enum, default_value_t = SignalKind::Spikes)]
    signal: SignalKind,

    /// Seed for the deterministic noise source.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Input representation to exercise.
    #[arg(long, value_enum, default_value_t = Representation::Records)]
    representation: Representation,

    /// Number of runs for averaging.
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    runs: usize,

    /// Output diagnostics as JSON instead of human-readable report.
    #[arg(long)]
    json: bool,

    /// Write the sampled series as an SVG preview to file.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write the sampled series as CSV to file.
    #[arg(long)]
    csv: Option<PathBuf>,
}

/// Input representation selection.
#[derive(Clone, Copy, ValueEnum)]
enum Representation {
    /// Named-field point records.
    Records,
    /// Two-element positional pairs.
    Pairs,
    /// Flat interleaved x/y buffer.
    Interleaved,
}

/// The generated signal held in the representation under test.
enum SeriesData {
    Records(Vec<Point>),
    Pairs(Vec<[f64; 2]>),
    Interleaved(Vec<f64>),
}

impl SeriesData {
    fn prepare(representation: Representation, points: Vec<Point>) -> Self {
        match representation {
            Representation::Records => Self::Records(points),
            Representation::Pairs => {
                Self::Pairs(points.iter().map(|p| [p.x, p.y]).collect())
            }
            Representation::Interleaved => {
                Self::Interleaved(points.iter().flat_map(|p| [p.x, p.y]).collect())
            }
        }
    }

    /// Run one downsampling pass, normalizing the output back to
    /// records for export.
    fn run(&self, budget: usize) -> (Vec<Point>, SampleDiagnostics) {
        match self {
            Self::Records(data) => {
                let (out, diagnostics) = sample_with_diagnostics(data.as_slice(), budget, &StdClock);
                (out.into_owned(), diagnostics)
            }
            Self::Pairs(data) => {
                let (out, diagnostics) = sample_with_diagnostics(data.as_slice(), budget, &StdClock);
                (out.iter().map(|&xy| Point::from(xy)).collect(), diagnostics)
            }
            Self::Interleaved(data) => {
                let (out, diagnostics) = sample_with_diagnostics(data.as_slice(), budget, &StdClock);
                let points = out
                    .chunks_exact(2)
                    .map(|xy| Point::new(xy[0], xy[1]))
                    .collect();
                (points, diagnostics)
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let raw = signal::generate(cli.signal, cli.points, cli.seed);
    let data = SeriesData::prepare(cli.representation, raw);

    eprintln!(
        "Signal: {:?} ({} points, seed {})",
        cli.signal, cli.points, cli.seed,
    );
    eprintln!("Budget: {}  Runs: {}", cli.budget, cli.runs);
    eprintln!();

    let mut all_diagnostics = Vec::with_capacity(cli.runs);

    for run in 0..cli.runs {
        if cli.runs > 1 {
            eprintln!("--- Run {}/{} ---", run + 1, cli.runs);
        }

        let (sampled, diagnostics) = data.run(cli.budget);

        if cli.json {
            match serde_json::to_string_pretty(&diagnostics) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error serializing diagnostics: {e}");
                    return ExitCode::FAILURE;
                }
            }
        } else {
            println!("{}", diagnostics.report());
        }

        // Write exports on the first run only.
        if run == 0 {
            write_exports(&cli, &sampled);
        }

        all_diagnostics.push(diagnostics);

        if cli.runs > 1 {
            eprintln!();
        }
    }

    // Print summary when multiple runs.
    if cli.runs > 1 {
        print_multi_run_summary(&all_diagnostics);
    }

    ExitCode::SUCCESS
}

/// Write the requested SVG/CSV dumps, reporting failures on stderr
/// without aborting the run.
fn write_exports(cli: &Cli, sampled: &[Point]) {
    if let Some(ref svg_path) = cli.svg {
        let description = format!(
            "{:?} signal, {} -> {} points",
            cli.signal,
            cli.points,
            sampled.len(),
        );
        let metadata = mabiki_export::SvgMetadata {
            title: Some("mabiki-bench"),
            description: Some(&description),
        };
        let svg = mabiki_export::to_svg(sampled, &metadata);
        match std::fs::write(svg_path, &svg) {
            Ok(()) => {
                eprintln!("SVG written to {} ({} bytes)", svg_path.display(), svg.len());
            }
            Err(e) => {
                eprintln!("Error writing SVG to {}: {e}", svg_path.display());
            }
        }
    }

    if let Some(ref csv_path) = cli.csv {
        let result = std::fs::File::create(csv_path)
            .map_err(mabiki_export::ExportError::from)
            .and_then(|file| mabiki_export::write_csv(sampled, file));
        match result {
            Ok(()) => eprintln!("CSV written to {}", csv_path.display()),
            Err(e) => eprintln!("Error writing CSV to {}: {e}", csv_path.display()),
        }
    }
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}

/// Print aggregated statistics across multiple runs.
#[allow(clippy::cast_precision_loss)]
fn print_multi_run_summary(all_diagnostics: &[SampleDiagnostics]) {
    debug_assert!(!all_diagnostics.is_empty(), "no diagnostics to summarize");

    println!();
    println!(
        "Summary ({} runs)\n{}",
        all_diagnostics.len(),
        "=".repeat(60),
    );

    if all_diagnostics.is_empty() {
        println!("Warning: no diagnostics to summarize");
        return;
    }

    let durations: Vec<f64> = all_diagnostics
        .iter()
        .map(|d| d.duration.as_secs_f64() * 1000.0)
        .collect();

    let min = durations.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = durations.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let mean = durations.iter().sum::<f64>() / durations.len() as f64;

    println!("Selection duration: min={min:.3}ms  mean={mean:.3}ms  max={max:.3}ms");

    let mean_maxima = all_diagnostics
        .iter()
        .map(|d| d.fidelity.maxima.ratio())
        .sum::<f64>()
        / all_diagnostics.len() as f64;
    let mean_minima = all_diagnostics
        .iter()
        .map(|d| d.fidelity.minima.ratio())
        .sum::<f64>()
        / all_diagnostics.len() as f64;

    println!(
        "Extrema retention: maxima mean {:.1}%  minima mean {:.1}%",
        mean_maxima * 100.0,
        mean_minima * 100.0,
    );
}
