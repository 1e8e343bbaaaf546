// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Output file configuration

use serde::{Deserialize, Serialize};

/// Default location of the persisted composite signal
pub const DEFAULT_SIGNAL_FILE: &str = "merged_signal_data.txt";

/// Where signals are persisted.
///
/// The generator writes `signal_file` and the reconstructor reads it back.
/// The optional files receive the reconstructed waveform and the one-sided
/// amplitude spectrum, in the same two-column text format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_signal_file")]
    pub signal_file: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconstructed_file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spectrum_file: Option<String>,
}

fn default_signal_file() -> String {
    DEFAULT_SIGNAL_FILE.to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            signal_file: default_signal_file(),
            reconstructed_file: None,
            spectrum_file: None,
        }
    }
}
