// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rtdtemp project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Temperature Acquisition Pipeline
//!
//! Turns a probe declaration into a calibrated temperature:
//! - read the differential voltage across the probe from the acquisition
//!   device (one batch read of all analog inputs),
//! - divide by the device's factory-calibrated excitation current to get
//!   the probe resistance,
//! - resolve the resistance through the model's calibration curve.
//!
//! The vendor driver sits behind the [`DaqDevice`] trait; the pipeline only
//! needs the excitation-current constant and batch channel reads. All
//! operations block the calling thread and every failure propagates
//! immediately — there is no retry or recovery logic, since each error
//! reflects either a configuration mistake or a hardware fault the caller
//! must handle.

pub mod drivers;

use crate::calibration::{CalibrationError, CalibrationStore};
use crate::probe::{AnalogInput, ProbeConfig, SensorKind, GND};
use anyhow::Result;
use log::{debug, info};
use thiserror::Error;

/// Errors raised by the measurement pipeline.
#[derive(Error, Debug)]
pub enum MeasurementError {
    #[error("not connected to the acquisition device")]
    NotConnected,
    #[error("invalid plus input: {0}")]
    InvalidChannel(String),
    #[error("invalid minus input: {0}")]
    InvalidReference(String),
    /// A zero calibrated excitation current indicates a hardware or
    /// calibration fault; it is never treated as an infinite resistance.
    #[error("cannot measure resistance with a null excitation current")]
    ZeroExcitationCurrent,
    /// Reserved for future sensor families; RTD is the only kind today.
    #[error("sensor kind {0:?} is not supported")]
    UnsupportedSensorKind(SensorKind),
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
    #[error("acquisition device error: {0}")]
    Device(anyhow::Error),
}

/// Driver interface to the acquisition device.
///
/// The vendor driver is an external collaborator; implementations are
/// expected to block until the device answers and to surface every device
/// fault as an error.
pub trait DaqDevice: Send {
    /// Factory-calibrated excitation current in amps (nominally 200 µA).
    fn excitation_current(&self) -> Result<f64>;

    /// Read all analog input values at once, in volts, indexed by channel
    /// number.
    fn read_analog_inputs(&mut self) -> Result<[f64; AnalogInput::COUNT]>;
}

/// An open connection to the acquisition device.
///
/// Holds the driver handle and the excitation current cached once at
/// connect time; dropped as a whole on disconnect.
struct DeviceSession {
    device: Box<dyn DaqDevice>,
    excitation_current: f64,
}

/// Measurement pipeline turning probe wiring into temperatures.
pub struct Thermometer {
    session: Option<DeviceSession>,
    calibration: CalibrationStore,
}

impl Thermometer {
    /// Create a thermometer backed by the given calibration store.
    ///
    /// The thermometer starts disconnected; every measurement fails with
    /// [`MeasurementError::NotConnected`] until [`connect`](Self::connect)
    /// succeeds.
    pub fn new(calibration: CalibrationStore) -> Self {
        Self {
            session: None,
            calibration,
        }
    }

    /// Connect through the given driver and cache its calibration constant.
    ///
    /// Connecting while already connected replaces the session.
    pub fn connect(&mut self, device: Box<dyn DaqDevice>) -> Result<(), MeasurementError> {
        let excitation_current = device
            .excitation_current()
            .map_err(MeasurementError::Device)?;
        info!(
            "connected to acquisition device, excitation current {} A",
            excitation_current
        );
        self.session = Some(DeviceSession {
            device,
            excitation_current,
        });
        Ok(())
    }

    /// Drop the device session.
    ///
    /// Subsequent measurements fail with [`MeasurementError::NotConnected`]
    /// until the thermometer is connected again.
    pub fn disconnect(&mut self) {
        if self.session.take().is_some() {
            info!("disconnected from acquisition device");
        }
    }

    /// Whether a device session is active.
    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Factory-calibrated excitation current of the connected device, in amps.
    pub fn calibrated_current(&self) -> Result<f64, MeasurementError> {
        self.session
            .as_ref()
            .map(|session| session.excitation_current)
            .ok_or(MeasurementError::NotConnected)
    }

    /// Temperature measured by the probe, in degrees Celsius.
    pub fn temperature_of(&mut self, probe: &ProbeConfig) -> Result<f64, MeasurementError> {
        if self.session.is_none() {
            return Err(MeasurementError::NotConnected);
        }
        if probe.kind != SensorKind::Rtd {
            return Err(MeasurementError::UnsupportedSensorKind(probe.kind));
        }
        let volts = self.voltage_of(probe)?;
        let amps = self.calibrated_current()?;
        let ohms = resistance_for(volts, amps)?;
        debug!(
            "probe {}: {} V / {} A = {} ohms",
            probe.name, volts, amps, ohms
        );
        Ok(self.calibration.temperature_for(ohms, &probe.model)?)
    }

    /// Voltage difference between the probe's plus and minus inputs, in volts.
    ///
    /// The minus side contributes exactly 0.0 when the probe is referenced
    /// against ground.
    pub fn voltage_of(&mut self, probe: &ProbeConfig) -> Result<f64, MeasurementError> {
        let session = self.session.as_mut().ok_or(MeasurementError::NotConnected)?;
        let plus = AnalogInput::from_name(&probe.plus_input)
            .ok_or_else(|| MeasurementError::InvalidChannel(probe.plus_input.clone()))?;
        let minus = if probe.minus_input == GND {
            None
        } else {
            Some(
                AnalogInput::from_name(&probe.minus_input)
                    .ok_or_else(|| MeasurementError::InvalidReference(probe.minus_input.clone()))?,
            )
        };

        // One batch read of every channel, then index into it.
        let readings = session
            .device
            .read_analog_inputs()
            .map_err(MeasurementError::Device)?;
        let plus_volts = readings[plus.index()];
        let minus_volts = match minus {
            Some(channel) => readings[channel.index()],
            None => 0.0,
        };
        Ok(plus_volts - minus_volts)
    }
}

/// Resistance in ohms for the given voltage and current (Ohm's law).
pub fn resistance_for(volts: f64, amps: f64) -> Result<f64, MeasurementError> {
    if amps == 0.0 {
        return Err(MeasurementError::ZeroExcitationCurrent);
    }
    Ok(volts / amps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resistance_obeys_ohms_law() {
        assert_eq!(resistance_for(10.0, 0.2).unwrap(), 50.0);
    }

    #[test]
    fn null_current_is_a_fault_not_an_infinite_resistance() {
        assert!(matches!(
            resistance_for(10.0, 0.0),
            Err(MeasurementError::ZeroExcitationCurrent)
        ));
    }

    #[test]
    fn disconnected_thermometer_refuses_to_measure() {
        let mut thermometer = Thermometer::new(CalibrationStore::new("/nonexistent.csv"));
        let probe = ProbeConfig {
            name: "R0".to_string(),
            kind: SensorKind::Rtd,
            model: "pt1000".to_string(),
            plus_input: "AIN0".to_string(),
            minus_input: GND.to_string(),
        };
        assert!(matches!(
            thermometer.temperature_of(&probe),
            Err(MeasurementError::NotConnected)
        ));
        assert!(matches!(
            thermometer.calibrated_current(),
            Err(MeasurementError::NotConnected)
        ));
        assert!(!thermometer.is_connected());
    }
}
