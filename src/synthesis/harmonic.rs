// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Harmonic Synthesizer
//!
//! Builds composite periodic signals from a list of sinusoids sampled on a
//! uniform time grid:
//!
//! ```text
//! amplitude[i] = Σ_k A_k · sin(2π f_k · i·Δt + φ_k)
//! time[i]      = i·Δt
//! ```
//!
//! Each component is accumulated into the composite buffer independently
//! per sample, so the per-sample loops run on the rayon thread pool. The
//! result only differs across thread counts by floating-point rounding.
//!
//! ## Examples
//!
//! ```rust
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
//! assert_eq!(signal.len(), 10_000);
//! ```

use rayon::prelude::*;

use crate::config::SynthesisConfig;
use crate::error::{HarmonicsError, Result};
use crate::signal::{HarmonicComponent, SampledSignal};

/// Sums harmonic components on a fixed `(point_count, time_step)` grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicSynthesizer {
    point_count: usize,
    time_step: f64,
}

impl HarmonicSynthesizer {
    /// Creates a synthesizer for `point_count` samples spaced `time_step` seconds apart.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `point_count` is zero or `time_step` is
    /// not a positive finite number.
    pub fn new(point_count: usize, time_step: f64) -> Result<Self> {
        if point_count == 0 {
            return Err(HarmonicsError::invalid("point count must be > 0"));
        }
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(HarmonicsError::invalid(format!(
                "time step must be a positive finite number, got {}",
                time_step
            )));
        }
        Ok(Self {
            point_count,
            time_step,
        })
    }

    /// Creates a synthesizer from the sampling grid of a configuration section.
    pub fn from_config(config: &SynthesisConfig) -> Result<Self> {
        Self::new(config.point_count, config.time_step)
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Sample times `i·Δt` for every point of the grid.
    pub fn time_axis(&self) -> Vec<f64> {
        let mut times = vec![0.0; self.point_count];
        times
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, t)| *t = i as f64 * self.time_step);
        times
    }

    /// Samples a single component over the grid.
    ///
    /// The component is not validated; see [`HarmonicComponent::validate`].
    pub fn generate_harmonic(&self, component: &HarmonicComponent) -> Vec<f64> {
        let mut samples = vec![0.0; self.point_count];
        self.add_component(&mut samples, component);
        samples
    }

    /// Accumulates `component` into `buffer`.
    ///
    /// Sample `i` of the buffer receives `component.value_at(i·Δt)`. Writes
    /// are disjoint per index, so the loop runs in parallel.
    pub fn add_component(&self, buffer: &mut [f64], component: &HarmonicComponent) {
        let dt = self.time_step;
        buffer
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, sample)| *sample += component.value_at(i as f64 * dt));
    }

    /// Builds the composite signal for `components`.
    ///
    /// An empty component list yields an all-zero signal.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if any component fails validation. All
    /// components are checked before any sample is computed, so no partial
    /// buffer is ever produced.
    pub fn synthesize(&self, components: &[HarmonicComponent]) -> Result<SampledSignal> {
        for component in components {
            component.validate()?;
        }

        let mut composite = vec![0.0; self.point_count];
        for component in components {
            self.add_component(&mut composite, component);
        }

        SampledSignal::from_parts(self.time_axis(), composite)
    }
}
