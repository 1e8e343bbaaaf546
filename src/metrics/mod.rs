// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Total Harmonic Distortion between an original and a reconstructed signal
//!
//! ```text
//! THD = sqrt(Σ (original[i] - reconstructed[i])² / Σ original[i]²) × 100
//! ```
//!
//! A zero-power original has no defined ratio. Two all-zero signals are
//! identical and score `0`; a non-zero reconstruction of silence fails with
//! [`HarmonicsError::UndefinedMetric`].

use rayon::prelude::*;

use crate::error::{HarmonicsError, Result};
use crate::signal::SampledSignal;

/// Squared error and original power, summed in one parallel pass
fn error_and_power(original: &[f64], reconstructed: &[f64]) -> (f64, f64) {
    original
        .par_iter()
        .zip(reconstructed.par_iter())
        .map(|(&o, &r)| {
            let error = o - r;
            (error * error, o * o)
        })
        .reduce(|| (0.0, 0.0), |a, b| (a.0 + b.0, a.1 + b.1))
}

/// THD percentage of `reconstructed` against `original`
///
/// # Errors
///
/// - `InvalidArgument` if the slices differ in length
/// - `UndefinedMetric` if `original` is all zero and `reconstructed` is not
pub fn thd(original: &[f64], reconstructed: &[f64]) -> Result<f64> {
    if original.len() != reconstructed.len() {
        return Err(HarmonicsError::invalid(format!(
            "cannot compare signals of different lengths: {} vs {}",
            original.len(),
            reconstructed.len()
        )));
    }

    let (squared_error, power) = error_and_power(original, reconstructed);

    if power == 0.0 {
        return if squared_error == 0.0 {
            Ok(0.0)
        } else {
            Err(HarmonicsError::UndefinedMetric)
        };
    }

    Ok((squared_error / power).sqrt() * 100.0)
}

/// THD between the amplitude sequences of two signals
pub fn thd_signals(original: &SampledSignal, reconstructed: &SampledSignal) -> Result<f64> {
    thd(original.amplitudes(), reconstructed.amplitudes())
}
