// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Composite waveform synthesis

pub mod harmonic;

pub use harmonic::HarmonicSynthesizer;
