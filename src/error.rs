// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Error types shared by the synthesis and reconstruction core

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the numeric core
///
/// Every variant is deterministic given its inputs, so callers should not
/// retry without changing them.
#[derive(Error, Debug)]
pub enum HarmonicsError {
    /// Bad point count, time step, harmonic parameter or mismatched lengths
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A persisted record that is not exactly two numeric fields
    #[error("Malformed record at line {line}: '{content}'")]
    MalformedRecord { line: usize, content: String },

    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// THD requested against a zero-power original with a non-zero reconstruction
    #[error("THD is undefined: original signal has zero power but reconstruction does not")]
    UndefinedMetric,
}

impl HarmonicsError {
    /// Shorthand for building an `InvalidArgument` error
    pub fn invalid(reason: impl Into<String>) -> Self {
        HarmonicsError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Map an I/O failure on `path` to `NotFound` or `Io`
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            HarmonicsError::NotFound { path }
        } else {
            HarmonicsError::Io { path, source }
        }
    }

    /// Process exit status used by the command line tools
    pub fn exit_code(&self) -> i32 {
        match self {
            HarmonicsError::InvalidArgument { .. } => 2,
            HarmonicsError::MalformedRecord { .. } => 3,
            HarmonicsError::NotFound { .. } => 4,
            HarmonicsError::Io { .. } => 5,
            HarmonicsError::UndefinedMetric => 6,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarmonicsError>;

/// Exit status for any error reaching a binary's `main`
///
/// Core errors keep their own code wherever they sit in the context chain,
/// everything else maps to 1.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<HarmonicsError>())
        .map_or(1, HarmonicsError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_maps_not_found() {
        let err = HarmonicsError::from_io(
            "missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, HarmonicsError::NotFound { .. }));

        let err = HarmonicsError::from_io(
            "locked.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, HarmonicsError::Io { .. }));
    }

    #[test]
    fn test_exit_codes_are_distinct_and_non_zero() {
        let errors = [
            HarmonicsError::invalid("x"),
            HarmonicsError::MalformedRecord {
                line: 1,
                content: String::new(),
            },
            HarmonicsError::NotFound {
                path: PathBuf::from("a"),
            },
            HarmonicsError::Io {
                path: PathBuf::from("a"),
                source: std::io::Error::other("boom"),
            },
            HarmonicsError::UndefinedMetric,
        ];
        let mut codes: Vec<i32> = errors.iter().map(|e| e.exit_code()).collect();
        assert!(codes.iter().all(|&c| c != 0));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_exit_code_for_looks_through_context() {
        let err = anyhow::Error::new(HarmonicsError::UndefinedMetric).context("while comparing");
        assert_eq!(exit_code_for(&err), 6);

        let err = anyhow::anyhow!("configuration is broken");
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn test_malformed_record_message_names_line() {
        let err = HarmonicsError::MalformedRecord {
            line: 7,
            content: "1.0 abc".to_string(),
        };
        assert!(err.to_string().contains("line 7"));
    }
}
