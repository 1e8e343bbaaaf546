// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Sampled signal data model
//!
//! This module holds the two value types every other stage works on:
//!
//! - [`HarmonicComponent`]: one sinusoid, `A · sin(2π f t + φ)`
//! - [`SampledSignal`]: parallel time and amplitude sequences
//!
//! Persistence of a [`SampledSignal`] lives in [`codec`].
//!
//! # Example
//!
//! ```
//! use rust_harmonics::signal::SampledSignal;
//!
//! let mut signal = SampledSignal::with_capacity(2);
//! signal.push(0.0, 0.0);
//! signal.push(1e-4, 0.5);
//!
//! assert_eq!(signal.len(), 2);
//! assert_eq!(signal.time_step(), Some(1e-4));
//! ```

pub mod codec;

pub use codec::SignalCodec;

use serde::{Deserialize, Serialize};

use crate::error::{HarmonicsError, Result};

/// A single sinusoid defined by amplitude, frequency (Hz) and phase (radians)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarmonicComponent {
    pub amplitude: f64,
    pub frequency: f64,
    #[serde(default)]
    pub phase: f64,
}

impl HarmonicComponent {
    pub fn new(amplitude: f64, frequency: f64, phase: f64) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
        }
    }

    /// Check that the component can be synthesized
    ///
    /// All three values must be finite, with `amplitude >= 0` and
    /// `frequency >= 0`.
    pub fn validate(&self) -> Result<()> {
        if !self.amplitude.is_finite() || !self.frequency.is_finite() || !self.phase.is_finite() {
            return Err(HarmonicsError::invalid(format!(
                "harmonic values must be finite (amplitude={}, frequency={}, phase={})",
                self.amplitude, self.frequency, self.phase
            )));
        }
        if self.amplitude < 0.0 {
            return Err(HarmonicsError::invalid(format!(
                "harmonic amplitude must be >= 0, got {}",
                self.amplitude
            )));
        }
        if self.frequency < 0.0 {
            return Err(HarmonicsError::invalid(format!(
                "harmonic frequency must be >= 0, got {}",
                self.frequency
            )));
        }
        Ok(())
    }

    /// Value of the sinusoid at time `t`
    #[inline]
    pub fn value_at(&self, t: f64) -> f64 {
        self.amplitude * (2.0 * std::f64::consts::PI * self.frequency * t + self.phase).sin()
    }
}

/// Parallel ordered sequences of sample times and amplitudes
///
/// Both sequences always have the same length. Signals produced by the
/// synthesizer are uniformly spaced; decoded signals are taken as they are
/// stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampledSignal {
    times: Vec<f64>,
    amplitudes: Vec<f64>,
}

impl SampledSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            times: Vec::with_capacity(capacity),
            amplitudes: Vec::with_capacity(capacity),
        }
    }

    /// Build a signal from already populated sequences
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the two sequences differ in length.
    pub fn from_parts(times: Vec<f64>, amplitudes: Vec<f64>) -> Result<Self> {
        if times.len() != amplitudes.len() {
            return Err(HarmonicsError::invalid(format!(
                "times and amplitudes differ in length: {} vs {}",
                times.len(),
                amplitudes.len()
            )));
        }
        Ok(Self { times, amplitudes })
    }

    /// Append one sample
    pub fn push(&mut self, time: f64, amplitude: f64) {
        self.times.push(time);
        self.amplitudes.push(amplitude);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitudes
    }

    /// Iterate over `(time, amplitude)` pairs in sample order
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times
            .iter()
            .copied()
            .zip(self.amplitudes.iter().copied())
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.times, self.amplitudes)
    }

    /// Spacing between the first two samples
    ///
    /// Returns `None` when there are fewer than two samples or the spacing
    /// is not a positive finite number.
    pub fn time_step(&self) -> Option<f64> {
        match self.times.as_slice() {
            [t0, t1, ..] => {
                let dt = t1 - t0;
                (dt.is_finite() && dt > 0.0).then_some(dt)
            }
            _ => None,
        }
    }

    /// Sum of squared amplitudes
    pub fn total_power(&self) -> f64 {
        self.amplitudes.iter().map(|a| a * a).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_rejects_length_mismatch() {
        let result = SampledSignal::from_parts(vec![0.0, 1.0], vec![0.0]);
        assert!(matches!(
            result,
            Err(HarmonicsError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_push_keeps_sequences_parallel() {
        let mut signal = SampledSignal::new();
        assert!(signal.is_empty());
        signal.push(0.0, 1.0);
        signal.push(0.5, -1.0);

        assert_eq!(signal.times(), &[0.0, 0.5]);
        assert_eq!(signal.amplitudes(), &[1.0, -1.0]);
        assert_eq!(signal.iter().collect::<Vec<_>>(), vec![(0.0, 1.0), (0.5, -1.0)]);
        assert_eq!(signal.total_power(), 2.0);
    }

    #[test]
    fn test_time_step() {
        let single = SampledSignal::from_parts(vec![0.0], vec![1.0]).unwrap();
        assert_eq!(single.time_step(), None);

        let flat = SampledSignal::from_parts(vec![1.0, 1.0], vec![0.0, 0.0]).unwrap();
        assert_eq!(flat.time_step(), None);

        let uniform = SampledSignal::from_parts(vec![0.0, 0.25, 0.5], vec![0.0; 3]).unwrap();
        assert_eq!(uniform.time_step(), Some(0.25));
    }

    #[test]
    fn test_component_validation() {
        assert!(HarmonicComponent::new(1.0, 50.0, 0.0).validate().is_ok());
        assert!(HarmonicComponent::new(0.0, 0.0, -3.0).validate().is_ok());
        assert!(HarmonicComponent::new(-1.0, 50.0, 0.0).validate().is_err());
        assert!(HarmonicComponent::new(1.0, -50.0, 0.0).validate().is_err());
        assert!(HarmonicComponent::new(f64::NAN, 50.0, 0.0).validate().is_err());
        assert!(HarmonicComponent::new(1.0, 50.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_component_value_at() {
        let c = HarmonicComponent::new(2.0, 1.0, 0.0);
        assert!(c.value_at(0.0).abs() < 1e-15);
        assert!((c.value_at(0.25) - 2.0).abs() < 1e-12);
    }
}
