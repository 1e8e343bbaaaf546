// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Reconstruction configuration

use serde::{Deserialize, Serialize};

use crate::spectral::AnalyzerKind;

/// Default THD budget in percent
pub const DEFAULT_TARGET_THD: f64 = 5.0;

/// Configuration for the THD-budgeted reconstructor.
///
/// * `target_thd` - Distortion budget in percent; zero or below uses every bin
/// * `analyzer` - Transform used for the spectrum (`auto`, `fft` or `dft`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionConfig {
    #[serde(default = "default_target_thd")]
    pub target_thd: f64,

    #[serde(default)]
    pub analyzer: AnalyzerKind,
}

fn default_target_thd() -> f64 {
    DEFAULT_TARGET_THD
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            target_thd: default_target_thd(),
            analyzer: AnalyzerKind::Auto,
        }
    }
}
