// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rtdtemp project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Probe declarations and bookkeeping
//!
//! A probe is declared by the caller: a name, a sensor family, a model
//! selecting the calibration curve, and the two analog inputs it is wired
//! to. Channel and model names are plain strings here and are validated at
//! measurement time, so a miswired declaration fails on first use rather
//! than at construction.

use serde::{Deserialize, Serialize};

/// Sentinel reference name for a probe wired against device ground.
pub const GND: &str = "GND";

/// Sensor family of a probe.
///
/// `kind` discriminates the sensor family while `model` selects the
/// calibration curve within it. RTD is the only family supported today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorKind {
    #[serde(rename = "RTD")]
    Rtd,
}

/// Analog input channels of the acquisition device.
///
/// The channel set is closed: the device exposes four analog inputs,
/// addressed `AIN0` through `AIN3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogInput {
    Ain0,
    Ain1,
    Ain2,
    Ain3,
}

impl AnalogInput {
    /// Number of analog input channels on the device.
    pub const COUNT: usize = 4;

    /// Resolve a channel name such as `"AIN2"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "AIN0" => Some(AnalogInput::Ain0),
            "AIN1" => Some(AnalogInput::Ain1),
            "AIN2" => Some(AnalogInput::Ain2),
            "AIN3" => Some(AnalogInput::Ain3),
            _ => None,
        }
    }

    /// Index of the channel within a batch read.
    pub fn index(self) -> usize {
        match self {
            AnalogInput::Ain0 => 0,
            AnalogInput::Ain1 => 1,
            AnalogInput::Ain2 => 2,
            AnalogInput::Ain3 => 3,
        }
    }
}

/// User-declared configuration for one temperature probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// User-defined name for the probe
    pub name: String,
    /// Sensor family; `RTD` is the only kind supported
    pub kind: SensorKind,
    /// Probe model selecting the calibration curve (`pt100`, `pt1000`,
    /// `ptc` or `ntc-101` through `ntc-105`)
    pub model: String,
    /// Analog input to measure voltage from (`AIN0` through `AIN3`)
    pub plus_input: String,
    /// Analog input to subtract voltage from, or `GND`
    pub minus_input: String,
}

/// Ordered collection of the configured probes.
///
/// Insertion order is preserved and duplicate names are permitted; there is
/// no removal. The registry only decouples probe bookkeeping from
/// acquisition.
#[derive(Debug, Default)]
pub struct ProbeRegistry {
    probes: Vec<ProbeConfig>,
}

impl ProbeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a probe to the list of configured probes.
    pub fn add_probe(&mut self, probe: ProbeConfig) {
        self.probes.push(probe);
    }

    /// Configured probes, in insertion order.
    pub fn probes(&self) -> &[ProbeConfig] {
        &self.probes
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(name: &str) -> ProbeConfig {
        ProbeConfig {
            name: name.to_string(),
            kind: SensorKind::Rtd,
            model: "pt1000".to_string(),
            plus_input: "AIN0".to_string(),
            minus_input: GND.to_string(),
        }
    }

    #[test]
    fn registry_preserves_insertion_order() {
        let mut registry = ProbeRegistry::new();
        registry.add_probe(probe("R1"));
        registry.add_probe(probe("R0"));
        let names: Vec<&str> = registry.probes().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["R1", "R0"]);
    }

    #[test]
    fn registry_permits_duplicate_names() {
        let mut registry = ProbeRegistry::new();
        registry.add_probe(probe("R0"));
        registry.add_probe(probe("R0"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn channel_names_resolve_to_their_index() {
        assert_eq!(AnalogInput::from_name("AIN0"), Some(AnalogInput::Ain0));
        assert_eq!(AnalogInput::from_name("AIN3").map(AnalogInput::index), Some(3));
        assert_eq!(AnalogInput::from_name("AIN4"), None);
        assert_eq!(AnalogInput::from_name("ain0"), None);
    }
}
