// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Rust Harmonics library
//!
//! This library synthesizes composite signals from harmonic components,
//! persists them as two-column text, and rebuilds them from their strongest
//! spectral bins under a Total Harmonic Distortion budget.
//!
//! ## Pipeline
//!
//! 1. [`synthesis`]: sum of sinusoids on a uniform time grid
//! 2. [`signal`]: the sampled signal model and its text codec
//! 3. [`spectral`]: one-sided amplitude spectrum (FFT or direct DFT)
//! 4. [`reconstruction`]: greedy magnitude-ranked reconstruction
//! 5. [`metrics`]: THD between an original and a reconstruction
//!
//! [`config`] loads the YAML configuration consumed by the binaries.

pub mod config;
pub mod error;
pub mod metrics;
pub mod reconstruction;
pub mod signal;
pub mod spectral;
pub mod synthesis;

pub use error::{HarmonicsError, Result};
pub use reconstruction::{HarmonicReconstructor, ReconstructionResult};
pub use signal::{HarmonicComponent, SampledSignal, SignalCodec};
pub use spectral::{create_spectral_analyzer, AnalyzerKind, Spectrum, SpectralAnalyzer};
pub use synthesis::HarmonicSynthesizer;
