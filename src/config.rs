// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rtdtemp project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Configuration Management
//!
//! YAML configuration for the demo binary: the calibration source path and
//! the declared probes.
//!
//! ```yaml
//! calibration_file: data/rtd_calibration.csv
//! probes:
//!   - name: R0
//!     kind: RTD
//!     model: pt1000
//!     plus_input: AIN0
//!     minus_input: GND
//! ```
//!
//! Channel and model names are deliberately not validated here: the
//! measurement pipeline checks them against the supported channel set and
//! model table on first use, so a miswired probe fails where the wiring is
//! actually exercised.

use crate::probe::ProbeConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default calibration source shipped with the crate.
pub const DEFAULT_CALIBRATION_FILE: &str = "data/rtd_calibration.csv";

/// Top-level configuration: calibration source plus the probes to poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the CSV calibration source.
    #[serde(default = "default_calibration_file")]
    pub calibration_file: PathBuf,

    /// Probes to poll, in declaration order.
    #[serde(default)]
    pub probes: Vec<ProbeConfig>,
}

fn default_calibration_file() -> PathBuf {
    PathBuf::from(DEFAULT_CALIBRATION_FILE)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            calibration_file: default_calibration_file(),
            probes: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;
        serde_yml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration from {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::SensorKind;

    #[test]
    fn parses_probe_declarations() {
        let yaml = "\
calibration_file: table.csv
probes:
  - name: R0
    kind: RTD
    model: pt1000
    plus_input: AIN0
    minus_input: GND
  - name: R1
    kind: RTD
    model: pt100
    plus_input: AIN1
    minus_input: AIN2
";
        let config: Config = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.calibration_file, PathBuf::from("table.csv"));
        assert_eq!(config.probes.len(), 2);
        assert_eq!(config.probes[0].name, "R0");
        assert_eq!(config.probes[0].kind, SensorKind::Rtd);
        assert_eq!(config.probes[1].minus_input, "AIN2");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = serde_yml::from_str("probes: []").unwrap();
        assert_eq!(
            config.calibration_file,
            PathBuf::from(DEFAULT_CALIBRATION_FILE)
        );
        assert!(config.probes.is_empty());
    }

    #[test]
    fn unknown_sensor_kind_is_rejected_at_parse_time() {
        let yaml = "\
probes:
  - name: T0
    kind: thermocouple
    model: pt100
    plus_input: AIN0
    minus_input: GND
";
        assert!(serde_yml::from_str::<Config>(yaml).is_err());
    }
}
