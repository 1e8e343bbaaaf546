// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration management for the harmonic tools
//!
//! This module provides functionality for loading, validating, and applying
//! configuration settings. The configuration is backed by a YAML file and
//! validated against a JSON schema before it is deserialized.
//!
//! ## Configuration Structure
//!
//! - `synthesis`: sampling grid and harmonic table
//! - `reconstruction`: THD budget and transform selection
//! - `output`: file locations for persisted signals
//!
//! ## Usage
//!
//! ```no_run
//! use rust_harmonics::config::Config;
//! use std::path::Path;
//!
//! // Load config from file, creates a default if not found
//! let mut config = Config::from_file(Path::new("harmonics.yaml")).unwrap();
//!
//! // Apply command line overrides if needed
//! config.apply_args(
//!     Some(4096),  // Point count
//!     Some(1e-3),  // Time step
//!     Some(1.0),   // Target THD
//!     None,        // Signal file
//! );
//!
//! println!("Target THD: {}%", config.reconstruction.target_thd);
//! ```

pub mod output;
pub mod reconstruction;
pub mod synthesis;
pub mod utils;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error};
use serde::{Deserialize, Serialize};

pub use output::OutputConfig;
pub use reconstruction::ReconstructionConfig;
pub use synthesis::SynthesisConfig;
pub use utils::{output_config_schema, validate_specific_rules};

/// Embedded JSON schema for configuration files
pub(crate) const CONFIG_SCHEMA: &str = include_str!("../../resources/config.schema.json");

/// Root configuration structure.
///
/// Every section falls back to its defaults when absent from the file, so
/// an empty YAML document is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Sampling grid and harmonic table for signal generation.
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// THD budget and spectrum settings for reconstruction.
    #[serde(default)]
    pub reconstruction: ReconstructionConfig,

    /// Persisted signal locations.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Helper method to create a sample config file when validation fails
    fn create_sample_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let sample_path = path.with_extension("sample.yaml");
        debug!("Original path: {:?}, Sample path: {:?}", path, sample_path);

        if let Some(parent) = sample_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating parent directory: {:?}", parent);
                fs::create_dir_all(parent).with_context(|| {
                    format!(
                        "Failed to create parent directory for sample config at {:?}",
                        parent
                    )
                })?;
            }
        }

        Self::default()
            .save_to_file(&sample_path)
            .with_context(|| format!("Failed to save sample config to {:?}", sample_path))?;

        error!(
            "Sample configuration file created at {:?}\nPlease edit and rename it",
            sample_path
        );
        Ok(())
    }

    /// Load configuration from a file
    ///
    /// A missing file is created with default values. A present file goes
    /// through YAML parsing, schema validation, deserialization and
    /// [`validate_specific_rules`]; if any step fails a `.sample.yaml` file
    /// with defaults is written next to it and the error is returned.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(
                "Configuration file not found at {:?}, creating default",
                path
            );
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        debug!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file at {:?}", path))?;

        let yaml_value: serde_yml::Value = match serde_yml::from_str(&contents) {
            Ok(value) => value,
            Err(err) => {
                error!("Configuration is not valid YAML: {}", err);
                Self::create_sample_config(path)?;
                return Err(anyhow::anyhow!(
                    "Failed to parse YAML configuration from {}: {}",
                    path.display(),
                    err
                ));
            }
        };

        // An empty document is null in YAML; treat it as "all defaults"
        let json_value = match serde_json::to_value(&yaml_value).with_context(|| {
            format!("Failed to convert YAML to JSON for validation: {:?}", path)
        })? {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            value => value,
        };

        let schema: serde_json::Value =
            serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;
        let validator = jsonschema::draft202012::options()
            .should_validate_formats(true)
            .build(&schema)?;

        debug!("Validating {} configuration against schema", path.display());
        if let Err(error) = validator.validate(&json_value) {
            error!("Configuration validation error before deserialization");
            Self::create_sample_config(path)?;
            anyhow::bail!("Configuration validation failed: {}", error);
        }

        debug!("Schema validation passed, deserializing into Config structure");
        let config: Config = match serde_json::from_value(json_value) {
            Ok(config) => config,
            Err(err) => {
                error!("Configuration deserialization error: {}", err);
                if let Err(e) = Self::create_sample_config(path) {
                    error!("Failed to create sample config: {}", e);
                }
                return Err(anyhow::anyhow!(
                    "Failed to deserialize configuration from {}: {}",
                    path.display(),
                    err
                ));
            }
        };

        if let Err(err) = validate_specific_rules(&config) {
            error!("Configuration specific validation error: {}", err);
            Self::create_sample_config(path)?;
            return Err(err);
        }

        Ok(config)
    }

    /// Save the configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml =
            serde_yml::to_string(self).context("Failed to serialize configuration to YAML")?;

        let mut file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create config file at {:?}", path.as_ref()))?;

        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Apply command line arguments to override configuration values.
    ///
    /// Only arguments that were actually provided replace the loaded values.
    ///
    /// # Parameters
    ///
    /// * `point_count` - Number of samples to synthesize
    /// * `time_step` - Sample spacing in seconds
    /// * `target_thd` - Reconstruction THD budget in percent
    /// * `signal_file` - Location of the persisted composite signal
    pub fn apply_args(
        &mut self,
        point_count: Option<usize>,
        time_step: Option<f64>,
        target_thd: Option<f64>,
        signal_file: Option<PathBuf>,
    ) {
        if let Some(count) = point_count {
            debug!("Overriding point count from command line: {}", count);
            self.synthesis.point_count = count;
        }
        if let Some(step) = time_step {
            debug!("Overriding time step from command line: {}", step);
            self.synthesis.time_step = step;
        }
        if let Some(thd) = target_thd {
            debug!("Overriding target THD from command line: {}", thd);
            self.reconstruction.target_thd = thd;
        }
        if let Some(file) = signal_file {
            debug!("Overriding signal file from command line: {:?}", file);
            self.output.signal_file = file.to_string_lossy().to_string();
        }
    }
}
