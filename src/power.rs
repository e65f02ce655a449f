// src/power.rs
use thiserror::Error;

/// Battery state sampled once per wake cycle; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryReading {
    pub volts: f64,
    /// True when USB/external power is detected.
    pub external_power: bool,
}

#[derive(Debug, Error)]
pub enum PowerError {
    #[error("battery gauge unreadable: {0}")]
    Gauge(String),
}

/// Capability seam for the battery/USB sense hardware. The cycle
/// controller maps a failed sample to the alert bucket - fail toward
/// warning the user, never toward showing a full charge.
pub trait PowerMonitor: Send {
    fn sample(&self) -> Result<BatteryReading, PowerError>;
}

/// Software stand-in reporting a configured reading.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedPowerMonitor {
    reading: BatteryReading,
}

impl SimulatedPowerMonitor {
    pub fn new(volts: f64, external_power: bool) -> Self {
        Self {
            reading: BatteryReading { volts, external_power },
        }
    }
}

impl PowerMonitor for SimulatedPowerMonitor {
    fn sample(&self) -> Result<BatteryReading, PowerError> {
        Ok(self.reading)
    }
}
