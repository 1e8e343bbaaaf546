// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration utilities
//!
//! This module provides utility functions for working with configuration
//! settings, including validation and schema management.

use anyhow::{Context, Result};
use log::{debug, warn};

use super::{Config, CONFIG_SCHEMA};

/// Output the embedded JSON schema to the console.
///
/// This function is called when the `--show-config-schema` flag is provided
/// on the command line.
///
/// # Example
///
/// ```bash
/// ./generate_signal --show-config-schema > config_schema.json
/// ```
pub fn output_config_schema() -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;

    let formatted_schema =
        serde_json::to_string_pretty(&schema).context("Failed to format JSON schema")?;

    println!("{}", formatted_schema);

    Ok(())
}

/// Validates the configuration against rules the JSON schema cannot express.
///
/// # Validation Rules
///
/// - **Sampling grid**: `point_count > 0`, `time_step` positive and finite
/// - **Harmonics**: every component finite with non-negative amplitude and
///   frequency
/// - **Target THD**: finite
/// - **Signal file**: not empty
///
/// Harmonics at or above the Nyquist frequency are reported with a warning
/// but accepted: they alias rather than fail.
pub fn validate_specific_rules(config: &Config) -> Result<()> {
    debug!("Performing additional validation checks");

    let synthesis = &config.synthesis;
    if synthesis.point_count == 0 {
        anyhow::bail!("Point count must be greater than zero");
    }
    if !synthesis.time_step.is_finite() || synthesis.time_step <= 0.0 {
        anyhow::bail!("Invalid time step: {}", synthesis.time_step);
    }

    let nyquist = synthesis.nyquist_frequency();
    for (index, harmonic) in synthesis.harmonics.iter().enumerate() {
        harmonic
            .validate()
            .with_context(|| format!("Invalid harmonic #{}", index))?;
        if harmonic.frequency >= nyquist {
            warn!(
                "Harmonic #{} at {} Hz is at or above the Nyquist frequency ({} Hz) and will alias",
                index, harmonic.frequency, nyquist
            );
        }
    }

    if !config.reconstruction.target_thd.is_finite() {
        anyhow::bail!(
            "Invalid target THD: {}",
            config.reconstruction.target_thd
        );
    }

    if config.output.signal_file.trim().is_empty() {
        anyhow::bail!("Signal file name must not be empty");
    }

    Ok(())
}
