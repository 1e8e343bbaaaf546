// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Composite signal generator
// Sums the configured harmonics on a uniform grid and writes the result as
// two-column "time amplitude" text.

use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use rust_harmonics::config::{output_config_schema, Config};
use rust_harmonics::error::exit_code_for;
use rust_harmonics::signal::SignalCodec;
use rust_harmonics::synthesis::HarmonicSynthesizer;

/// Harmonic signal generator
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML), created with defaults if missing
    #[arg(short, long, value_name = "FILE", default_value = "harmonics.yaml")]
    config: PathBuf,

    /// Output signal file, overrides `output.signal_file`
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Number of samples, overrides `synthesis.point_count`
    #[arg(short = 'n', long)]
    points: Option<usize>,

    /// Sample spacing in seconds, overrides `synthesis.time_step`
    #[arg(short, long)]
    time_step: Option<f64>,

    /// Print the configuration JSON schema and exit
    #[arg(long, default_value_t = false)]
    show_config_schema: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(args) {
        eprintln!("Error: {:#}", err);
        std::process::exit(exit_code_for(&err));
    }
}

fn run(args: Args) -> Result<()> {
    if args.show_config_schema {
        return output_config_schema();
    }

    let mut config = Config::from_file(&args.config)?;
    config.apply_args(args.points, args.time_step, None, args.output);

    let synthesizer = HarmonicSynthesizer::from_config(&config.synthesis)?;
    info!(
        "Synthesizing {} samples at {} s spacing from {} harmonics",
        synthesizer.point_count(),
        synthesizer.time_step(),
        config.synthesis.harmonics.len()
    );
    let signal = synthesizer.synthesize(&config.synthesis.harmonics)?;

    let codec = SignalCodec::new(&config.output.signal_file);
    codec.save(&signal)?;

    println!("Harmonic Signal Generator");
    println!("-------------------------");
    for harmonic in &config.synthesis.harmonics {
        println!(
            "- {:>10.3} Hz  amplitude {:.6}  phase {:.4} rad",
            harmonic.frequency, harmonic.amplitude, harmonic.phase
        );
    }
    println!(
        "{} samples written to: {}",
        signal.len(),
        codec.path().display()
    );

    Ok(())
}
