// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! THD-budgeted harmonic reconstruction
//!
//! The reconstructor ranks the one-sided spectrum of a signal by magnitude
//! and adds the strongest bins back one at a time, as zero-phase sinusoids,
//! until the Total Harmonic Distortion against the original drops to the
//! requested budget.
//!
//! ## Selection rules
//!
//! 1. Bins are ranked by descending magnitude, lower frequency first on ties.
//! 2. The DC bin is never selected: a sine at 0 Hz is identically zero.
//! 3. Bins whose magnitude is at or below [`MAGNITUDE_FLOOR`] are trivial.
//! 4. Each selected bin becomes `HarmonicComponent { amplitude: magnitude,
//!    frequency, phase: 0 }`. Spectrum magnitudes are already single-sided,
//!    i.e. twice the two-sided `|X_k|/N`.
//! 5. Selection stops as soon as THD ≤ target, or when the non-trivial bins
//!    run out. Running out is a best-effort result, not an error.
//!
//! ## Example
//!
//! ```
//! use rust_harmonics::reconstruction::HarmonicReconstructor;
//! use rust_harmonics::signal::HarmonicComponent;
//! use rust_harmonics::synthesis::HarmonicSynthesizer;
//!
//! let synthesizer = HarmonicSynthesizer::new(10_000, 1e-4).unwrap();
//! let signal = synthesizer
//!     .synthesize(&[
//!         HarmonicComponent::new(1.0, 50.0, 0.0),
//!         HarmonicComponent::new(0.3, 150.0, 0.0),
//!     ])
//!     .unwrap();
//!
//! let result = HarmonicReconstructor::new(5.0)
//!     .unwrap()
//!     .reconstruct(&signal, 1e-4)
//!     .unwrap();
//!
//! assert!(result.converged);
//! assert_eq!(result.frequencies.len(), 2);
//! ```

use serde::Serialize;

use crate::config::ReconstructionConfig;
use crate::error::{HarmonicsError, Result};
use crate::metrics;
use crate::signal::{HarmonicComponent, SampledSignal};
use crate::spectral::{create_spectral_analyzer, AnalyzerKind, Spectrum};
use crate::synthesis::HarmonicSynthesizer;

/// Bins at or below this magnitude carry nothing worth reconstructing
pub const MAGNITUDE_FLOOR: f64 = 1e-12;

/// Output of [`HarmonicReconstructor::reconstruct`]
#[derive(Debug, Clone, Serialize)]
pub struct ReconstructionResult {
    /// Selected frequencies in selection order
    pub frequencies: Vec<f64>,
    /// Amplitudes matching `frequencies`
    pub amplitudes: Vec<f64>,
    pub reconstructed: SampledSignal,
    /// THD percentage achieved by `reconstructed`
    pub thd: f64,
    /// Whether `thd` met the requested target
    pub converged: bool,
    /// Lowest THD seen over every prefix of the selection, the empty one included
    pub best_thd: f64,
    /// Number of leading components that reach `best_thd`
    pub best_component_count: usize,
}

impl ReconstructionResult {
    /// The selected bins as zero-phase components
    pub fn components(&self) -> Vec<HarmonicComponent> {
        self.frequencies
            .iter()
            .zip(self.amplitudes.iter())
            .map(|(&frequency, &amplitude)| HarmonicComponent::new(amplitude, frequency, 0.0))
            .collect()
    }
}

/// Greedy magnitude-ranked reconstructor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicReconstructor {
    target_thd: f64,
    analyzer: AnalyzerKind,
}

impl HarmonicReconstructor {
    /// Create a reconstructor aiming for `target_thd` percent
    ///
    /// A target of zero or below is accepted and forces every non-trivial
    /// bin to be used.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `target_thd` is NaN.
    pub fn new(target_thd: f64) -> Result<Self> {
        if target_thd.is_nan() {
            return Err(HarmonicsError::invalid("target THD must be a number"));
        }
        Ok(Self {
            target_thd,
            analyzer: AnalyzerKind::default(),
        })
    }

    pub fn from_config(config: &ReconstructionConfig) -> Result<Self> {
        Ok(Self::new(config.target_thd)?.with_analyzer(config.analyzer))
    }

    /// Select the transform used for the spectrum
    pub fn with_analyzer(mut self, analyzer: AnalyzerKind) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn target_thd(&self) -> f64 {
        self.target_thd
    }

    /// Reconstruct `original`, sampled every `time_step` seconds
    ///
    /// The reconstruction shares the time stamps of `original`. Components
    /// are phased from its first sample.
    ///
    /// When the target is never met every non-trivial bin ends up selected,
    /// and with leakage from off-bin tones that full set can score worse
    /// than a shorter prefix, or worse than no reconstruction at all.
    /// `best_thd` and `best_component_count` report the best prefix seen.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for fewer than two samples, a non-positive
    /// `time_step` or non-finite samples.
    pub fn reconstruct(
        &self,
        original: &SampledSignal,
        time_step: f64,
    ) -> Result<ReconstructionResult> {
        let samples = original.amplitudes();
        let mut analyzer = create_spectral_analyzer(self.analyzer, samples.len());
        let spectrum = analyzer.analyze(samples, time_step)?;
        let synthesizer = HarmonicSynthesizer::new(samples.len(), time_step)?;

        let mut frequencies = Vec::new();
        let mut amplitudes = Vec::new();
        let mut partial = vec![0.0; samples.len()];
        let mut thd = metrics::thd(samples, &partial)?;
        let mut best_thd = thd;
        let mut best_component_count = 0;

        for bin in rank_bins(&spectrum) {
            if thd <= self.target_thd {
                break;
            }
            let point = spectrum.points[bin];
            let component = HarmonicComponent::new(point.magnitude, point.frequency, 0.0);
            synthesizer.add_component(&mut partial, &component);
            frequencies.push(point.frequency);
            amplitudes.push(point.magnitude);
            thd = metrics::thd(samples, &partial)?;
            if thd < best_thd {
                best_thd = thd;
                best_component_count = frequencies.len();
            }
        }

        let reconstructed = SampledSignal::from_parts(original.times().to_vec(), partial)?;

        Ok(ReconstructionResult {
            frequencies,
            amplitudes,
            reconstructed,
            thd,
            converged: thd <= self.target_thd,
            best_thd,
            best_component_count,
        })
    }
}

/// Non-trivial, non-DC bin indices, strongest first, lower index first on ties
fn rank_bins(spectrum: &Spectrum) -> Vec<usize> {
    let mut ranked: Vec<usize> = (1..spectrum.len())
        .filter(|&k| spectrum.points[k].magnitude > MAGNITUDE_FLOOR)
        .collect();
    ranked.sort_by(|&a, &b| {
        spectrum.points[b]
            .magnitude
            .total_cmp(&spectrum.points[a].magnitude)
            .then(a.cmp(&b))
    });
    ranked
}
