// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// THD-budgeted signal reconstruction
// Loads a persisted signal, rebuilds it from its strongest spectral bins and
// reports the selected components.

use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use rust_harmonics::config::{output_config_schema, Config};
use rust_harmonics::error::exit_code_for;
use rust_harmonics::reconstruction::HarmonicReconstructor;
use rust_harmonics::signal::{SampledSignal, SignalCodec};
use rust_harmonics::spectral::create_spectral_analyzer;

/// Harmonic signal reconstructor
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML), created with defaults if missing
    #[arg(short, long, value_name = "FILE", default_value = "harmonics.yaml")]
    config: PathBuf,

    /// Input signal file, overrides `output.signal_file`
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// THD budget in percent, overrides `reconstruction.target_thd`
    #[arg(short, long)]
    target_thd: Option<f64>,

    /// Write the reconstructed waveform to this file
    #[arg(long, value_name = "FILE")]
    reconstructed_output: Option<PathBuf>,

    /// Write the one-sided amplitude spectrum to this file
    #[arg(long, value_name = "FILE")]
    spectrum_output: Option<PathBuf>,

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
    config.apply_args(None, None, args.target_thd, args.input);
    if let Some(path) = args.reconstructed_output {
        config.output.reconstructed_file = Some(path.to_string_lossy().to_string());
    }
    if let Some(path) = args.spectrum_output {
        config.output.spectrum_file = Some(path.to_string_lossy().to_string());
    }

    let signal = SignalCodec::new(&config.output.signal_file).load()?;
    let time_step = match signal.time_step() {
        Some(step) => step,
        None => {
            warn!(
                "Cannot derive the time step from {}, using configured {} s",
                config.output.signal_file, config.synthesis.time_step
            );
            config.synthesis.time_step
        }
    };
    info!(
        "Loaded {} samples from {} at {} s spacing",
        signal.len(),
        config.output.signal_file,
        time_step
    );

    let reconstructor = HarmonicReconstructor::from_config(&config.reconstruction)?;
    let result = reconstructor.reconstruct(&signal, time_step)?;

    println!("Harmonic Reconstruction");
    println!("-----------------------");
    println!("Target THD: {:.4}%", reconstructor.target_thd());
    println!("Achieved THD: {:.4}%", result.thd);
    if !result.converged {
        println!("Target not reached: every non-trivial bin is already in use");
        println!(
            "Best THD along the way: {:.4}% with the first {} components",
            result.best_thd, result.best_component_count
        );
    }
    println!("Selected components ({}):", result.frequencies.len());
    for (frequency, amplitude) in result.frequencies.iter().zip(result.amplitudes.iter()) {
        println!("- {:>10.3} Hz  amplitude {:.6}", frequency, amplitude);
    }

    if let Some(path) = &config.output.reconstructed_file {
        SignalCodec::new(path).save(&result.reconstructed)?;
        println!("Reconstructed signal written to: {}", path);
    }

    if let Some(path) = &config.output.spectrum_file {
        let mut analyzer =
            create_spectral_analyzer(config.reconstruction.analyzer, signal.len());
        let spectrum = analyzer.analyze(signal.amplitudes(), time_step)?;
        let table = SampledSignal::from_parts(spectrum.frequencies(), spectrum.magnitudes())?;
        SignalCodec::new(path).save(&table)?;
        println!("Spectrum written to: {}", path);
    }

    Ok(())
}
