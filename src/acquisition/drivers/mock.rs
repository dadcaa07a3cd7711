// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rtdtemp project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Mock acquisition driver
//!
//! Stands in for the vendor driver in tests and the demo binary. Channel
//! voltages and the excitation-current constant are programmable, and reads
//! can be made to fail to exercise the pipeline's device-fault path.

use crate::acquisition::DaqDevice;
use crate::probe::AnalogInput;
use anyhow::{anyhow, Result};

/// Nominal factory calibration of the 200 µA excitation source.
pub const NOMINAL_EXCITATION_CURRENT_A: f64 = 200e-6;

/// Simulated acquisition device with fixed channel voltages.
#[derive(Debug, Clone)]
pub struct MockDaq {
    channels: [f64; AnalogInput::COUNT],
    excitation_current: f64,
    fail_reads: bool,
}

impl MockDaq {
    /// Driver with every channel at 0 V and the nominal excitation current.
    pub fn new() -> Self {
        Self::with_channels([0.0; AnalogInput::COUNT])
    }

    /// Driver reporting the given channel voltages.
    pub fn with_channels(channels: [f64; AnalogInput::COUNT]) -> Self {
        Self {
            channels,
            excitation_current: NOMINAL_EXCITATION_CURRENT_A,
            fail_reads: false,
        }
    }

    /// Override the excitation-current constant, e.g. with 0 A to simulate
    /// a factory-calibration fault.
    pub fn with_excitation_current(mut self, amps: f64) -> Self {
        self.excitation_current = amps;
        self
    }

    /// Make every channel read fail, simulating a device I/O fault.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }
}

impl Default for MockDaq {
    fn default() -> Self {
        Self::new()
    }
}

impl DaqDevice for MockDaq {
    fn excitation_current(&self) -> Result<f64> {
        Ok(self.excitation_current)
    }

    fn read_analog_inputs(&mut self) -> Result<[f64; AnalogInput::COUNT]> {
        if self.fail_reads {
            return Err(anyhow!("analog input read failed"));
        }
        Ok(self.channels)
    }
}
