use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::fs;
use thiserror::Error;

use crate::model::RenderOptions;

/// Fallback location when the config names none.
pub const DEFAULT_LATITUDE: f64 = 47.6062;
pub const DEFAULT_LONGITUDE: f64 = -122.3321;

const DEFAULT_SLEEP_MINUTES: u64 = 180;
const DEFAULT_RETRY_MINUTES: u64 = 15;
const DEFAULT_BATTERY_VOLTS: f64 = 3.9;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Everything is optional in the file; accessors apply the defaults so
/// an empty config is a working config.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Network credentials, consumed by the network link.
    pub ssid: Option<String>,
    pub password: Option<String>,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// Whole hours relative to UTC, applied to displayed times.
    pub timezone_offset: Option<i32>,
    pub use_fahrenheit: Option<bool>,

    /// Nominal deep-sleep between successful cycles.
    pub sleep_minutes: Option<u64>,
    /// Short recovery sleep after an error cycle.
    pub retry_minutes: Option<u64>,

    pub icons_dir: Option<PathBuf>,
    /// Where the software surface writes its frame.
    pub output: Option<PathBuf>,

    /// Battery sample reported by the simulated power monitor.
    pub battery_volts: Option<f64>,
    pub external_power: Option<bool>,
}

impl Config {
    pub fn ssid(&self) -> &str {
        self.ssid.as_deref().unwrap_or("")
    }

    pub fn latitude(&self) -> f64 {
        self.latitude.unwrap_or(DEFAULT_LATITUDE)
    }

    pub fn longitude(&self) -> f64 {
        self.longitude.unwrap_or(DEFAULT_LONGITUDE)
    }

    pub fn timezone_offset(&self) -> i32 {
        self.timezone_offset.unwrap_or(0)
    }

    pub fn use_fahrenheit(&self) -> bool {
        self.use_fahrenheit.unwrap_or(false)
    }

    pub fn sleep(&self) -> Duration {
        Duration::from_secs(60 * self.sleep_minutes.unwrap_or(DEFAULT_SLEEP_MINUTES))
    }

    pub fn retry_sleep(&self) -> Duration {
        Duration::from_secs(60 * self.retry_minutes.unwrap_or(DEFAULT_RETRY_MINUTES))
    }

    pub fn icons_dir(&self) -> PathBuf {
        self.icons_dir.clone().unwrap_or_else(|| PathBuf::from("icons"))
    }

    pub fn output(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| PathBuf::from("frame.pgm"))
    }

    pub fn battery_volts(&self) -> f64 {
        self.battery_volts.unwrap_or(DEFAULT_BATTERY_VOLTS)
    }

    pub fn external_power(&self) -> bool {
        self.external_power.unwrap_or(false)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            timezone_offset: self.timezone_offset(),
            use_fahrenheit: self.use_fahrenheit(),
        }
    }
}

/// Reads the explicit file, or the first hit from the search path, or
/// falls back to defaults when no file exists anywhere.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let cfg = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::Validation(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            read_yaml(path)?
        }
        None => match find_config_file() {
            Some(path) => read_yaml(&path)?,
            None => Config::default(),
        },
    };

    validate(&cfg)?;
    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    let name = env!("CARGO_PKG_NAME");
    if let Some(home) = home_dir() {
        let p = home.join(format!(".config/{name}/config.yaml"));
        if p.exists() {
            return Some(p);
        }
        let p = home.join(format!(".config/{name}.yaml"));
        if p.exists() {
            return Some(p);
        }
    }
    let local = format!("{name}.yaml");
    for candidate in [local.as_str(), "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() {
            return Some(p);
        }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(lat) = cfg.latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        return Err(ConfigError::Validation("latitude must be -90..=90".into()));
    }
    if let Some(lon) = cfg.longitude
        && !(-180.0..=180.0).contains(&lon)
    {
        return Err(ConfigError::Validation("longitude must be -180..=180".into()));
    }
    if let Some(tz) = cfg.timezone_offset
        && !(-12..=14).contains(&tz)
    {
        return Err(ConfigError::Validation("timezone_offset must be -12..=14".into()));
    }
    if cfg.sleep_minutes == Some(0) || cfg.retry_minutes == Some(0) {
        return Err(ConfigError::Validation("sleep intervals must be > 0".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_give_a_working_config() {
        let cfg = Config::default();
        assert_eq!(cfg.latitude(), DEFAULT_LATITUDE);
        assert_eq!(cfg.longitude(), DEFAULT_LONGITUDE);
        assert_eq!(cfg.timezone_offset(), 0);
        assert!(!cfg.use_fahrenheit());
        assert_eq!(cfg.sleep(), Duration::from_secs(3 * 60 * 60));
        assert_eq!(cfg.retry_sleep(), Duration::from_secs(15 * 60));
        assert_eq!(cfg.icons_dir(), PathBuf::from("icons"));
    }

    #[test]
    fn yaml_round_trip() {
        let cfg: Config = serde_yaml::from_str(
            "ssid: shack\n\
             password: hunter2\n\
             latitude: 52.4204\n\
             longitude: 13.62\n\
             timezone_offset: 1\n\
             use_fahrenheit: true\n",
        )
        .unwrap();
        assert_eq!(cfg.ssid(), "shack");
        assert_eq!(cfg.latitude(), 52.4204);
        assert_eq!(cfg.timezone_offset(), 1);
        assert!(cfg.use_fahrenheit());
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn out_of_range_values_fail_validation() {
        let bad = Config { latitude: Some(123.0), ..Default::default() };
        assert!(validate(&bad).is_err());
        let bad = Config { timezone_offset: Some(30), ..Default::default() };
        assert!(validate(&bad).is_err());
        let bad = Config { sleep_minutes: Some(0), ..Default::default() };
        assert!(validate(&bad).is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(load(Some(Path::new("/nonexistent/inkcast.yaml"))).is_err());
    }
}
