// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Synthesis configuration
//!
//! This module defines the sampling grid and the harmonic table used to
//! generate the composite signal.

use serde::{Deserialize, Serialize};

use crate::signal::HarmonicComponent;

/// Default number of samples in a generated signal
pub const DEFAULT_POINT_COUNT: usize = 10_000;

/// Default spacing between samples in seconds
pub const DEFAULT_TIME_STEP: f64 = 1e-4;

/// Configuration for the harmonic synthesizer.
///
/// # Example
///
/// ```
/// use rust_harmonics::config::SynthesisConfig;
/// use rust_harmonics::signal::HarmonicComponent;
///
/// let synthesis = SynthesisConfig {
///     point_count: 4096,
///     time_step: 1.0 / 48000.0,
///     harmonics: vec![HarmonicComponent::new(0.5, 1000.0, 0.0)],
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Number of samples to generate
    #[serde(default = "default_point_count")]
    pub point_count: usize,

    /// Sample spacing in seconds
    #[serde(default = "default_time_step")]
    pub time_step: f64,

    /// Components summed into the composite signal, in order
    #[serde(default = "default_harmonics")]
    pub harmonics: Vec<HarmonicComponent>,
}

fn default_point_count() -> usize {
    DEFAULT_POINT_COUNT
}

fn default_time_step() -> f64 {
    DEFAULT_TIME_STEP
}

fn default_harmonics() -> Vec<HarmonicComponent> {
    // 50 Hz fundamental with a third harmonic
    vec![
        HarmonicComponent::new(1.0, 50.0, 0.0),
        HarmonicComponent::new(0.3, 150.0, 0.0),
    ]
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            point_count: default_point_count(),
            time_step: default_time_step(),
            harmonics: default_harmonics(),
        }
    }
}

impl SynthesisConfig {
    /// Highest frequency representable on this grid
    pub fn nyquist_frequency(&self) -> f64 {
        0.5 / self.time_step
    }
}
