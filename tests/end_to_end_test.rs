// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use anyhow::Result;
use rust_harmonics::config::Config;
use rust_harmonics::metrics::thd_signals;
use rust_harmonics::reconstruction::HarmonicReconstructor;
use rust_harmonics::signal::SignalCodec;
use rust_harmonics::synthesis::HarmonicSynthesizer;
use tempfile::tempdir;

#[test]
fn test_default_pipeline_through_file() -> Result<()> {
    let temp_dir = tempdir()?;
    let config = Config::default();

    // 50 Hz and 150 Hz at 1 : 0.3, sampled at 10 kHz for one second
    let synthesizer = HarmonicSynthesizer::from_config(&config.synthesis)?;
    let signal = synthesizer.synthesize(&config.synthesis.harmonics)?;
    assert_eq!(signal.len(), 10_000);

    let codec = SignalCodec::new(temp_dir.path().join(&config.output.signal_file));
    codec.save(&signal)?;
    let loaded = codec.load()?;
    assert_eq!(loaded.amplitudes(), signal.amplitudes());

    let time_step = loaded.time_step().unwrap_or(config.synthesis.time_step);
    let result = HarmonicReconstructor::from_config(&config.reconstruction)?
        .reconstruct(&loaded, time_step)?;

    assert!(result.converged);
    assert!(result.thd <= 5.0);
    assert_eq!(result.frequencies.len(), 2);
    assert!((result.frequencies[0] - 50.0).abs() < 1e-9);
    assert!((result.frequencies[1] - 150.0).abs() < 1e-9);
    assert!((result.amplitudes[0] - 1.0).abs() < 1e-9);
    assert!((result.amplitudes[1] - 0.3).abs() < 1e-9);

    // The reported THD is the one between the loaded and rebuilt signals
    let measured = thd_signals(&loaded, &result.reconstructed)?;
    assert!((measured - result.thd).abs() < 1e-9);

    // The reconstruction persists like any other signal
    let rebuilt_codec = SignalCodec::new(temp_dir.path().join("rebuilt.txt"));
    rebuilt_codec.save(&result.reconstructed)?;
    let rebuilt = rebuilt_codec.load()?;
    assert_eq!(rebuilt.amplitudes(), result.reconstructed.amplitudes());
    assert_eq!(rebuilt.times(), loaded.times());

    Ok(())
}

#[test]
fn test_loose_budget_stops_at_fundamental() -> Result<()> {
    let config = Config::default();
    let signal = HarmonicSynthesizer::from_config(&config.synthesis)?
        .synthesize(&config.synthesis.harmonics)?;

    // Dropping the 0.3 third harmonic leaves sqrt(0.09 / 1.09) ≈ 28.7 %
    let result = HarmonicReconstructor::new(30.0)?.reconstruct(&signal, 1e-4)?;
    assert_eq!(result.frequencies.len(), 1);
    assert!((result.frequencies[0] - 50.0).abs() < 1e-9);
    assert!((result.thd - (0.09f64 / 1.09).sqrt() * 100.0).abs() < 1e-6);

    Ok(())
}
