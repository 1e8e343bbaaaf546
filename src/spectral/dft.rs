// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Direct discrete Fourier transform
//!
//! Quadratic in the signal length. Only the `N/2` bins of the one-sided
//! spectrum are evaluated, each on its own rayon task.

use rayon::prelude::*;
use rustfft::num_complex::Complex64;
use std::f64::consts::PI;

use super::{lookup_magnitude, one_sided_spectrum, validate_input, SpectralAnalyzer, Spectrum};
use crate::error::Result;

/// Spectral analyzer summing the DFT definition directly
#[derive(Default)]
pub struct DftAnalyzer {
    spectrum_data: Option<Spectrum>,
}

impl DftAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    fn compute_dft(signal: &[f64]) -> Vec<Complex64> {
        let n = signal.len();
        (0..n / 2)
            .into_par_iter()
            .map(|k| {
                signal
                    .iter()
                    .enumerate()
                    .fold(Complex64::new(0.0, 0.0), |acc, (j, &x)| {
                        // k·j reduced mod N keeps the angle small for long signals
                        let angle = -2.0 * PI * ((k * j) % n) as f64 / n as f64;
                        acc + Complex64::from_polar(x, angle)
                    })
            })
            .collect()
    }
}

impl SpectralAnalyzer for DftAnalyzer {
    fn analyze(&mut self, signal: &[f64], time_step: f64) -> Result<Spectrum> {
        validate_input(signal, time_step)?;

        let bins = Self::compute_dft(signal);
        let spectrum = one_sided_spectrum(&bins, signal.len(), time_step, 1.0 / signal.len() as f64);

        self.spectrum_data = Some(spectrum.clone());
        Ok(spectrum)
    }

    fn magnitude_at(&self, frequency: f64) -> Result<f64> {
        lookup_magnitude(self.spectrum_data.as_ref(), frequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectral::FftAnalyzer;

    #[test]
    fn test_matches_fft_on_odd_length() {
        let signal: Vec<f64> = (0..45)
            .map(|i| {
                let t = i as f64 / 45.0;
                0.7 * (2.0 * PI * 3.0 * t).sin() + 0.2 * (2.0 * PI * 11.0 * t + 0.4).sin() + 0.1
            })
            .collect();

        let direct = DftAnalyzer::new().analyze(&signal, 1.0 / 45.0).unwrap();
        let fast = FftAnalyzer::new().analyze(&signal, 1.0 / 45.0).unwrap();

        assert_eq!(direct.len(), 22);
        assert_eq!(direct.len(), fast.len());
        for (d, f) in direct.points.iter().zip(fast.points.iter()) {
            assert!((d.frequency - f.frequency).abs() < 1e-12);
            assert!((d.magnitude - f.magnitude).abs() < 1e-9);
        }
        assert!((direct.points[3].magnitude - 0.7).abs() < 1e-9);
        assert!((direct.points[0].magnitude - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_two_samples_give_dc_only() {
        let mut analyzer = DftAnalyzer::new();
        let spectrum = analyzer.analyze(&[1.0, 3.0], 0.5).unwrap();
        assert_eq!(spectrum.len(), 1);
        assert!((spectrum.points[0].magnitude - 2.0).abs() < 1e-12);
        assert!((analyzer.magnitude_at(0.0).unwrap() - 2.0).abs() < 1e-12);
    }
}
