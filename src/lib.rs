//! RTD thermometry library
//!
//! Reads resistance temperature detectors through a multi-channel analog
//! acquisition device and converts the measured resistance into degrees
//! Celsius using per-model calibration curves.

pub mod acquisition;
pub mod calibration;
pub mod config;
pub mod probe;

pub use acquisition::{DaqDevice, MeasurementError, Thermometer};
pub use calibration::{CalibrationError, CalibrationStore};
pub use probe::{ProbeConfig, ProbeRegistry, SensorKind};
