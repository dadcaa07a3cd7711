// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rtdtemp project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Demo: poll every configured probe once and print its temperature.

use anyhow::Result;
use clap::Parser;
use rtdtemp::acquisition::drivers::MockDaq;
use rtdtemp::calibration::CalibrationStore;
use rtdtemp::config::Config;
use rtdtemp::probe::{AnalogInput, ProbeConfig, ProbeRegistry, SensorKind, GND};
use rtdtemp::Thermometer;
use std::path::PathBuf;

/// Print the temperature of every configured probe
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML)
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Voltages preloaded on the mock device channels, in volts
    #[arg(long, value_delimiter = ',', default_value = "0.2,0.0,0.0,0.0")]
    channel_volts: Vec<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    anyhow::ensure!(
        args.channel_volts.len() == AnalogInput::COUNT,
        "--channel-volts expects {} comma-separated values",
        AnalogInput::COUNT
    );

    let config = if args.config.exists() {
        Config::from_file(&args.config)?
    } else {
        Config::default()
    };

    let mut registry = ProbeRegistry::new();
    for probe in config.probes {
        registry.add_probe(probe);
    }
    if registry.is_empty() {
        // Same default wiring as a single pt1000 on AIN0 against ground.
        registry.add_probe(ProbeConfig {
            name: "R0".to_string(),
            kind: SensorKind::Rtd,
            model: "pt1000".to_string(),
            plus_input: "AIN0".to_string(),
            minus_input: GND.to_string(),
        });
    }

    let mut channels = [0.0; AnalogInput::COUNT];
    channels.copy_from_slice(&args.channel_volts);
    let device = MockDaq::with_channels(channels);

    let mut thermometer = Thermometer::new(CalibrationStore::new(&config.calibration_file));
    thermometer.connect(Box::new(device))?;
    for probe in registry.probes() {
        let celsius = thermometer.temperature_of(probe)?;
        println!("{}: {:.2} °C", probe.name, celsius);
    }
    thermometer.disconnect();

    Ok(())
}
