// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rtdtemp project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Calibration Table Store
//!
//! Loads per-model resistance-to-temperature curves from a CSV calibration
//! source and caches them for the lifetime of the store.
//!
//! ## Source format
//!
//! The source is a CSV table with one column per calibration-curve code
//! (`404` for pt100, `501` for pt1000, ...) holding resistances in ohms,
//! plus a `Celsius` column holding the temperature of each row. Negative
//! temperatures use an underscore in place of the minus sign (`_50` means
//! -50 °C). A row whose resistance cell is empty for a given column simply
//! does not belong to that model's curve.
//!
//! Rows are required to be pre-sorted ascending by resistance within each
//! model column. This is a hard contract of the calibration source; the
//! store does not verify or enforce it.

pub mod curve;

pub use curve::{interpolate, CalibrationCurve, CalibrationPoint};

use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::num::ParseFloatError;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Header of the temperature column in the calibration source.
const CELSIUS_COLUMN: &str = "Celsius";

/// Errors raised while resolving a resistance to a temperature.
#[derive(Error, Debug)]
pub enum CalibrationError {
    /// The probe model name is not in the supported model table.
    #[error("unsupported probe model: {0}")]
    UnsupportedModel(String),
    /// The calibration source has no column for the requested model code.
    #[error("calibration source has no column for model code {0}")]
    UnknownModel(String),
    /// The calibration source is missing its temperature column.
    #[error("calibration source has no 'Celsius' column")]
    MissingCelsiusColumn,
    /// The queried resistance falls outside the tabulated range.
    #[error("resistance {ohms} ohms out of range, too {direction}")]
    OutOfRange { ohms: f64, direction: RangeDirection },
    #[error("cannot read calibration source: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed calibration source: {0}")]
    Csv(#[from] csv::Error),
    /// A resistance or temperature cell failed to parse as a number.
    #[error("invalid number '{value}' in calibration source")]
    InvalidNumber {
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Which side of the tabulated range an out-of-range query fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeDirection {
    TooSmall,
    TooLarge,
}

impl fmt::Display for RangeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeDirection::TooSmall => write!(f, "small"),
            RangeDirection::TooLarge => write!(f, "large"),
        }
    }
}

/// Map a probe model name to its calibration-source column key.
///
/// Membership is closed and known at design time; the table mirrors the
/// column layout of the calibration source.
pub fn model_code(probe_model: &str) -> Option<&'static str> {
    match probe_model {
        "pt100" => Some("404"),
        "pt1000" => Some("501"),
        "ptc" => Some("201"),
        "ntc-101" => Some("101"),
        "ntc-102" => Some("102"),
        "ntc-103" => Some("103"),
        "ntc-104" => Some("104"),
        "ntc-105" => Some("105"),
        _ => None,
    }
}

/// Loads and caches per-model calibration curves from a CSV source.
///
/// The source file is read once per model code, on the first request for
/// that code; the resulting curve is immutable and cached for the lifetime
/// of the store.
pub struct CalibrationStore {
    source: PathBuf,
    curves: Mutex<HashMap<String, Arc<CalibrationCurve>>>,
}

impl CalibrationStore {
    /// Create a store reading from the given CSV calibration source.
    ///
    /// The file is not opened until a curve is first requested.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            curves: Mutex::new(HashMap::new()),
        }
    }

    /// Temperature in Celsius for a measured resistance of the given probe model.
    ///
    /// Resolves the model name through the supported-model table, then
    /// delegates to the model's calibration curve.
    pub fn temperature_for(&self, ohms: f64, probe_model: &str) -> Result<f64, CalibrationError> {
        let code = model_code(probe_model)
            .ok_or_else(|| CalibrationError::UnsupportedModel(probe_model.to_string()))?;
        self.curve_for(code)?.temperature_for(ohms)
    }

    /// Calibration curve for a model code, loading it on first request.
    pub fn curve_for(&self, code: &str) -> Result<Arc<CalibrationCurve>, CalibrationError> {
        // A poisoned lock only means a previous load panicked; at worst the
        // cache is missing an entry, so the guard stays usable.
        let mut curves = match self.curves.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(curve) = curves.get(code) {
            return Ok(Arc::clone(curve));
        }
        let file = File::open(&self.source)?;
        let curve = Arc::new(load_curve(file, code)?);
        debug!(
            "loaded {} calibration points for model code {} from {}",
            curve.len(),
            code,
            self.source.display()
        );
        curves.insert(code.to_string(), Arc::clone(&curve));
        Ok(curve)
    }
}

/// Build the curve for one model code from CSV calibration data.
///
/// Rows whose resistance cell is empty for the requested column are
/// skipped; the remaining rows are kept in file order.
fn load_curve<R: Read>(source: R, code: &str) -> Result<CalibrationCurve, CalibrationError> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers()?.clone();
    let resistance_column = headers
        .iter()
        .position(|header| header == code)
        .ok_or_else(|| CalibrationError::UnknownModel(code.to_string()))?;
    let celsius_column = headers
        .iter()
        .position(|header| header == CELSIUS_COLUMN)
        .ok_or(CalibrationError::MissingCelsiusColumn)?;

    let mut points = Vec::new();
    for record in reader.records() {
        let record = record?;
        let resistance = record.get(resistance_column).unwrap_or("").trim();
        if resistance.is_empty() {
            continue;
        }
        let celsius = record.get(celsius_column).unwrap_or("").trim();
        points.push(CalibrationPoint {
            resistance_ohms: parse_cell(resistance)?,
            // Underscore-as-minus convention of the calibration source
            temperature_celsius: parse_cell(&celsius.replace('_', "-"))?,
        });
    }
    Ok(CalibrationCurve::new(points))
}

fn parse_cell(value: &str) -> Result<f64, CalibrationError> {
    value.parse().map_err(|source| CalibrationError::InvalidNumber {
        value: value.to_string(),
        source,
    })
}
