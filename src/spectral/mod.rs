// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//!
//! Spectral analysis module
//!
//! This module computes the one-sided magnitude spectrum of a uniformly
//! sampled signal. For `N` samples spaced `Δt` apart it yields `N/2` bins;
//! bin `k` sits at `k / (N·Δt)` Hz and carries `|X_k|·2/N` (`|X_0|/N` for
//! the DC bin), so a sinusoid of amplitude `A` on an exact bin reads `A`.
//!
//! Two analyzers implement [`SpectralAnalyzer`]:
//!
//! - [`FftAnalyzer`]: rustfft, log-linear for any length
//! - [`DftAnalyzer`]: direct summation, quadratic, for short signals

mod dft;
mod fft;

pub use dft::DftAnalyzer;
pub use fft::{FftAnalyzer, WindowFunction};

use rustfft::num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{HarmonicsError, Result};

/// Signals at or below this length use the direct transform under [`AnalyzerKind::Auto`]
pub const DFT_MAX_AUTO_LENGTH: usize = 64;

/// Trait for implementing spectral analysis
pub trait SpectralAnalyzer: Send + Sync {
    /// Analyze `signal`, sampled every `time_step` seconds
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the signal has fewer than two samples, contains
    /// non-finite values, or `time_step` is not positive and finite.
    fn analyze(&mut self, signal: &[f64], time_step: f64) -> Result<Spectrum>;

    /// Magnitude of the bin nearest to `frequency` in the last analyzed spectrum
    fn magnitude_at(&self, frequency: f64) -> Result<f64>;
}

/// One analyzed frequency bin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumPoint {
    /// Bin frequency in Hz
    pub frequency: f64,
    /// Single-sided amplitude at this bin
    pub magnitude: f64,
}

/// Data resulting from spectral analysis
///
/// `points` and `phases` share the same indexing, ascending in frequency.
#[derive(Debug, Clone)]
pub struct Spectrum {
    pub points: Vec<SpectrumPoint>,
    /// Phase of each bin in radians
    pub phases: Vec<f64>,
    pub time_step: f64,
    /// Number of time-domain samples the spectrum was computed from
    pub sample_count: usize,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Spacing between adjacent bins in Hz
    pub fn frequency_resolution(&self) -> f64 {
        1.0 / (self.sample_count as f64 * self.time_step)
    }

    pub fn frequencies(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.frequency).collect()
    }

    pub fn magnitudes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.magnitude).collect()
    }

    /// Strongest bin, lowest frequency first on ties
    pub fn peak(&self) -> Option<SpectrumPoint> {
        self.points.iter().copied().reduce(|best, p| {
            if p.magnitude > best.magnitude {
                p
            } else {
                best
            }
        })
    }

    /// Index of the bin nearest to `frequency`
    pub fn bin_for(&self, frequency: f64) -> Option<usize> {
        if !frequency.is_finite() || frequency < 0.0 {
            return None;
        }
        let bin = (frequency / self.frequency_resolution()).round() as usize;
        (bin < self.points.len()).then_some(bin)
    }
}

/// Choice of transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    /// Direct transform for short signals, FFT otherwise
    #[default]
    Auto,
    Fft,
    Dft,
}

/// Create a spectral analyzer for signals of `sample_count` samples
pub fn create_spectral_analyzer(
    kind: AnalyzerKind,
    sample_count: usize,
) -> Box<dyn SpectralAnalyzer> {
    match kind {
        AnalyzerKind::Fft => Box::new(FftAnalyzer::new()),
        AnalyzerKind::Dft => Box::new(DftAnalyzer::new()),
        AnalyzerKind::Auto if sample_count <= DFT_MAX_AUTO_LENGTH => Box::new(DftAnalyzer::new()),
        AnalyzerKind::Auto => Box::new(FftAnalyzer::new()),
    }
}

/// Shared input checks for every analyzer
pub(crate) fn validate_input(signal: &[f64], time_step: f64) -> Result<()> {
    if signal.len() < 2 {
        return Err(HarmonicsError::invalid(format!(
            "spectral analysis needs at least 2 samples, got {}",
            signal.len()
        )));
    }
    if !time_step.is_finite() || time_step <= 0.0 {
        return Err(HarmonicsError::invalid(format!(
            "time step must be a positive finite number, got {}",
            time_step
        )));
    }
    if let Some(i) = signal.iter().position(|v| !v.is_finite()) {
        return Err(HarmonicsError::invalid(format!(
            "sample {} is not finite",
            i
        )));
    }
    Ok(())
}

/// Convert the first `N/2` transform bins into a one-sided spectrum
///
/// `scale` is the normalisation applied to `|X_k|` before the one-sided
/// doubling, `1/N` for an unwindowed transform.
pub(crate) fn one_sided_spectrum(
    bins: &[Complex64],
    sample_count: usize,
    time_step: f64,
    scale: f64,
) -> Spectrum {
    let useful_bins = sample_count / 2;
    let df = 1.0 / (sample_count as f64 * time_step);

    let mut points = Vec::with_capacity(useful_bins);
    let mut phases = Vec::with_capacity(useful_bins);

    for (k, value) in bins.iter().take(useful_bins).enumerate() {
        let one_sided = if k == 0 { 1.0 } else { 2.0 };
        points.push(SpectrumPoint {
            frequency: k as f64 * df,
            magnitude: value.norm() * scale * one_sided,
        });
        phases.push(value.arg());
    }

    Spectrum {
        points,
        phases,
        time_step,
        sample_count,
    }
}

/// Nearest-bin lookup shared by the analyzers
pub(crate) fn lookup_magnitude(spectrum: Option<&Spectrum>, frequency: f64) -> Result<f64> {
    let spectrum = spectrum
        .ok_or_else(|| HarmonicsError::invalid("no spectrum available, call analyze() first"))?;
    let bin = spectrum.bin_for(frequency).ok_or_else(|| {
        HarmonicsError::invalid(format!(
            "frequency {} Hz is outside the analyzed spectrum",
            frequency
        ))
    })?;
    Ok(spectrum.points[bin].magnitude)
}
