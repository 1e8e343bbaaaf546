// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Flat text persistence for sampled signals
//!
//! One record per line, `<time> <amplitude>`, in sample order, no header.
//! Values are written with the shortest representation that reads back to
//! the same `f64`. Reading accepts any whitespace separator, scientific
//! notation, CRLF line endings and blank lines.
//!
//! # Example
//!
//! ```no_run
//! use rust_harmonics::signal::{SampledSignal, SignalCodec};
//!
//! let codec = SignalCodec::new("merged_signal_data.txt");
//! let signal = SampledSignal::from_parts(vec![0.0, 1e-4], vec![0.0, 0.5]).unwrap();
//! codec.save(&signal).unwrap();
//! let restored = codec.load().unwrap();
//! assert_eq!(restored.len(), 2);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::SampledSignal;
use crate::error::{HarmonicsError, Result};

/// Label used for I/O errors on handles that are not backed by a named file
const STREAM_LABEL: &str = "<stream>";

/// Reads and writes a [`SampledSignal`] at a fixed location
#[derive(Debug, Clone)]
pub struct SignalCodec {
    path: PathBuf,
}

impl SignalCodec {
    /// Create a codec bound to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `signal` to the configured file, creating or truncating it
    pub fn save(&self, signal: &SampledSignal) -> Result<()> {
        let file = File::create(&self.path).map_err(|e| HarmonicsError::from_io(&self.path, e))?;
        let mut writer = BufWriter::new(file);
        write_records(signal, &mut writer, &self.path)?;
        writer
            .flush()
            .map_err(|e| HarmonicsError::from_io(&self.path, e))
    }

    /// Read a signal back from the configured file
    ///
    /// # Errors
    ///
    /// - `NotFound` if the file does not exist
    /// - `Io` if it cannot be read
    /// - `MalformedRecord` on the first line that is not two numbers; no
    ///   partial signal is returned
    pub fn load(&self) -> Result<SampledSignal> {
        let file = File::open(&self.path).map_err(|e| HarmonicsError::from_io(&self.path, e))?;
        read_records(BufReader::new(file), &self.path)
    }

    /// Serialize `signal` onto any writer
    pub fn encode<W: Write>(signal: &SampledSignal, writer: &mut W) -> Result<()> {
        write_records(signal, writer, Path::new(STREAM_LABEL))
    }

    /// Deserialize a signal from any buffered reader
    pub fn decode<R: BufRead>(reader: R) -> Result<SampledSignal> {
        read_records(reader, Path::new(STREAM_LABEL))
    }
}

fn write_records<W: Write>(signal: &SampledSignal, writer: &mut W, origin: &Path) -> Result<()> {
    for (time, amplitude) in signal.iter() {
        writeln!(writer, "{} {}", time, amplitude).map_err(|e| HarmonicsError::from_io(origin, e))?;
    }
    Ok(())
}

fn read_records<R: BufRead>(reader: R, origin: &Path) -> Result<SampledSignal> {
    let mut signal = SampledSignal::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| HarmonicsError::from_io(origin, e))?;
        let record = line.trim();
        if record.is_empty() {
            continue;
        }
        let (time, amplitude) = parse_record(record).ok_or_else(|| {
            HarmonicsError::MalformedRecord {
                line: index + 1,
                content: record.to_string(),
            }
        })?;
        signal.push(time, amplitude);
    }

    Ok(signal)
}

/// Parse exactly two finite numeric fields
fn parse_record(record: &str) -> Option<(f64, f64)> {
    let mut fields = record.split_whitespace();
    let time = parse_field(fields.next()?)?;
    let amplitude = parse_field(fields.next()?)?;
    if fields.next().is_some() {
        return None;
    }
    Some((time, amplitude))
}

fn parse_field(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}
