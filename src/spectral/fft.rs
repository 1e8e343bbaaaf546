// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! FFT implementation for spectral analysis
//!
//! rustfft plans mixed-radix or Bluestein transforms for arbitrary lengths,
//! so signals are transformed at their native length: nothing is padded and
//! nothing is truncated.
//!
//! # Example
//!
//! ```
//! use rust_harmonics::spectral::{FftAnalyzer, SpectralAnalyzer};
//!
//! // 1 s of a 50 Hz sine sampled at 10 kHz
//! let time_step = 1e-4;
//! let signal: Vec<f64> = (0..10_000)
//!     .map(|i| (2.0 * std::f64::consts::PI * 50.0 * i as f64 * time_step).sin())
//!     .collect();
//!
//! let mut analyzer = FftAnalyzer::new();
//! let spectrum = analyzer.analyze(&signal, time_step).unwrap();
//!
//! let peak = spectrum.peak().unwrap();
//! assert!((peak.frequency - 50.0).abs() < 1e-9);
//! assert!((peak.magnitude - 1.0).abs() < 1e-9);
//! ```

use rustfft::{num_complex::Complex64, FftPlanner};

use super::{lookup_magnitude, one_sided_spectrum, validate_input, SpectralAnalyzer, Spectrum};
use crate::error::{HarmonicsError, Result};

/// FFT-based spectral analyzer
pub struct FftAnalyzer {
    window_function: WindowFunction,
    spectrum_data: Option<Spectrum>,
}

impl Default for FftAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl FftAnalyzer {
    /// Create a new FFT analyzer without windowing
    pub fn new() -> Self {
        Self::with_window(WindowFunction::Rectangular)
    }

    /// Create a new FFT analyzer applying `window_function` before the transform
    ///
    /// Windowed spectra are normalised by the window's coherent gain, so an
    /// on-bin tone keeps its amplitude.
    pub fn with_window(window_function: WindowFunction) -> Self {
        Self {
            window_function,
            spectrum_data: None,
        }
    }

    pub fn window_function(&self) -> WindowFunction {
        self.window_function
    }

    /// Compute FFT of the input signal
    fn compute_fft(&self, signal: &[f64]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer.len());
        fft.process(&mut buffer);

        buffer
    }
}

impl SpectralAnalyzer for FftAnalyzer {
    fn analyze(&mut self, signal: &[f64], time_step: f64) -> Result<Spectrum> {
        validate_input(signal, time_step)?;

        let coefficients = self.window_function.generate(signal.len());
        let gain: f64 = coefficients.iter().sum();
        // Hann and Blackman vanish entirely on two samples
        if gain <= f64::EPSILON {
            return Err(HarmonicsError::invalid(format!(
                "{:?} window has no gain over {} samples",
                self.window_function,
                signal.len()
            )));
        }
        let windowed: Vec<f64> = signal
            .iter()
            .zip(coefficients.iter())
            .map(|(&x, &w)| x * w)
            .collect();

        let fft_output = self.compute_fft(&windowed);
        let spectrum = one_sided_spectrum(&fft_output, signal.len(), time_step, 1.0 / gain);

        self.spectrum_data = Some(spectrum.clone());
        Ok(spectrum)
    }

    fn magnitude_at(&self, frequency: f64) -> Result<f64> {
        lookup_magnitude(self.spectrum_data.as_ref(), frequency)
    }
}

/// Available window functions for spectral analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowFunction {
    /// No windowing; required for reconstruction
    #[default]
    Rectangular,
    Hann,
    Blackman,
}

impl WindowFunction {
    /// Window coefficients for `size` samples
    pub fn generate(&self, size: usize) -> Vec<f64> {
        use std::f64::consts::PI;

        let span = size.saturating_sub(1).max(1) as f64;
        (0..size)
            .map(|i| {
                let x = i as f64 / span;
                match self {
                    WindowFunction::Rectangular => 1.0,
                    WindowFunction::Hann => 0.5 * (1.0 - (2.0 * PI * x).cos()),
                    WindowFunction::Blackman => {
                        0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn tone(n: usize, time_step: f64, amplitude: f64, frequency: f64) -> Vec<f64> {
        (0..n)
            .map(|i| amplitude * (2.0 * PI * frequency * i as f64 * time_step).sin())
            .collect()
    }

    #[test]
    fn test_bin_count_and_frequencies() {
        let mut analyzer = FftAnalyzer::new();
        let spectrum = analyzer.analyze(&tone(1000, 1e-3, 1.0, 5.0), 1e-3).unwrap();

        assert_eq!(spectrum.len(), 500);
        assert_eq!(spectrum.points[0].frequency, 0.0);
        assert!((spectrum.points[1].frequency - 1.0).abs() < 1e-12);
        assert!((spectrum.points[499].frequency - 499.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_sided_amplitude() {
        let mut analyzer = FftAnalyzer::new();
        let spectrum = analyzer.analyze(&tone(1000, 1e-3, 0.6, 40.0), 1e-3).unwrap();

        assert!((spectrum.points[40].magnitude - 0.6).abs() < 1e-9);
        assert!(spectrum.points[39].magnitude < 1e-9);
        assert!((analyzer.magnitude_at(40.2).unwrap() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_dc_bin_is_not_doubled() {
        let mut analyzer = FftAnalyzer::new();
        let spectrum = analyzer.analyze(&[0.5; 16], 0.1).unwrap();

        assert!((spectrum.points[0].magnitude - 0.5).abs() < 1e-12);
        assert!(spectrum.points[1..].iter().all(|p| p.magnitude < 1e-12));
    }

    #[test]
    fn test_non_power_of_two_length() {
        // 997 is prime: Bluestein path, no padding
        let n = 997;
        let time_step = 1.0 / n as f64;
        let mut analyzer = FftAnalyzer::new();
        let spectrum = analyzer.analyze(&tone(n, time_step, 1.0, 13.0), time_step).unwrap();

        assert_eq!(spectrum.len(), n / 2);
        assert_eq!(spectrum.sample_count, n);
        let peak = spectrum.peak().unwrap();
        assert!((peak.frequency - 13.0).abs() < 1e-9);
        assert!((peak.magnitude - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_hann_window_keeps_on_bin_amplitude_close() {
        let mut analyzer = FftAnalyzer::with_window(WindowFunction::Hann);
        let spectrum = analyzer.analyze(&tone(4096, 1.0 / 4096.0, 1.0, 256.0), 1.0 / 4096.0).unwrap();
        assert!((spectrum.points[256].magnitude - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_window_generation() {
        let hann = WindowFunction::Hann.generate(65);
        assert!(hann[0] < 1e-12);
        assert!((hann[32] - 1.0).abs() < 1e-12);

        let blackman = WindowFunction::Blackman.generate(65);
        assert!(blackman[0].abs() < 1e-12);

        assert_eq!(WindowFunction::Rectangular.generate(3), vec![1.0; 3]);
    }

    #[test]
    fn test_magnitude_before_analyze_fails() {
        let analyzer = FftAnalyzer::new();
        assert!(matches!(
            analyzer.magnitude_at(1.0),
            Err(HarmonicsError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_zero_gain_window_is_rejected() {
        for window in [WindowFunction::Hann, WindowFunction::Blackman] {
            let mut analyzer = FftAnalyzer::with_window(window);
            assert!(matches!(
                analyzer.analyze(&[1.0, 3.0], 0.5),
                Err(HarmonicsError::InvalidArgument { .. })
            ));
        }

        let mut analyzer = FftAnalyzer::new();
        let spectrum = analyzer.analyze(&[1.0, 3.0], 0.5).unwrap();
        assert!((spectrum.points[0].magnitude - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut analyzer = FftAnalyzer::new();
        assert!(analyzer.analyze(&[1.0], 1e-3).is_err());
        assert!(analyzer.analyze(&[1.0, 2.0], -1e-3).is_err());
    }
}
