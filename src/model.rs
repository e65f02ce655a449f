/*
 *  model.rs
 *
 *  inkcast - e-paper weather board
 *  (c) 2025-26 Stuart Hunter
 *
 *  Fully-resolved display primitives, one set per wake cycle.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use log::warn;

use crate::classify::{BatteryIcon, UNKNOWN_ICON, weather_icon_name};
use crate::forecast::ForecastSeries;
use crate::power::{BatteryReading, PowerError};
use crate::series::{DerivedSummary, HourlyBar};
use crate::timeutil;

/// Character budget for the raw-symbol-code text shown when an icon
/// asset cannot be loaded.
pub const FALLBACK_CHAR_BUDGET: usize = 12;

/// Rendered when min/max cannot be computed; never a misleading zero.
const NO_DATA_TEMP: &str = "--.-\u{00b0}";

/// Unit conversion and timezone knobs the builder needs from config.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub timezone_offset: i32,
    pub use_fahrenheit: bool,
}

/// What a cycle puts on the panel: either the dashboard, or one of the
/// explicit failure notices. Consumed once by the layout engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenContent {
    Dashboard(DisplayModel),
    Notice(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    ConnectionFailed,
    DataUnavailable,
}

impl Notice {
    /// Two display lines, centered by the layout engine.
    pub fn lines(&self) -> &'static str {
        match self {
            Notice::ConnectionFailed => "Connection\nfailed",
            Notice::DataUnavailable => "Weather data\nunavailable",
        }
    }
}

/// Everything the layout engine needs, already formatted. Built fresh
/// from a series each cycle and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModel {
    pub temperature_text: String,
    pub icon_name: String,
    /// Raw symbol code, pre-truncated, for the missing-asset fallback.
    pub symbol_fallback: String,
    pub max_text: String,
    pub min_text: String,
    pub wind_text: String,
    pub humidity_text: String,
    pub pressure_text: String,
    pub updated_text: String,
    pub date_lines: [String; 3],
    pub battery_icon: BatteryIcon,
    pub battery_text: String,
    pub bars: Vec<HourlyBar>,
}

fn range_temp(celsius: f64, fahrenheit: bool) -> String {
    let shown = if fahrenheit {
        timeutil::celsius_to_fahrenheit(celsius)
    } else {
        celsius
    };
    format!("{:.1}\u{00b0}", shown)
}

impl DisplayModel {
    /// Resolves a parsed series plus the battery sample into display
    /// primitives. `fetched_at` is the ISO-converted HTTP `Date` header;
    /// when present it supersedes the payload's `updated_at` as the
    /// freshness stamp.
    pub fn build(
        series: &ForecastSeries,
        fetched_at: Option<&str>,
        battery: Result<BatteryReading, PowerError>,
        opts: RenderOptions,
    ) -> Self {
        let current = series.current();
        let summary = DerivedSummary::from_series(series);

        let symbol = current.symbol_code.as_deref().unwrap_or(UNKNOWN_ICON);
        let symbol_fallback: String = symbol.chars().take(FALLBACK_CHAR_BUDGET).collect();

        let (max_text, min_text) = match summary.min_max {
            Some((lo, hi)) => (
                range_temp(hi, opts.use_fahrenheit),
                range_temp(lo, opts.use_fahrenheit),
            ),
            None => (NO_DATA_TEMP.to_string(), NO_DATA_TEMP.to_string()),
        };

        let (battery_icon, battery_text) = match battery {
            Ok(reading) => (
                BatteryIcon::classify(reading.volts, reading.external_power),
                format!("{:.1}V", reading.volts),
            ),
            Err(e) => {
                warn!("battery sample failed: {}", e);
                (BatteryIcon::Alert, "?.?V".to_string())
            }
        };

        let stamp = fetched_at.unwrap_or(series.updated_at.as_str());

        Self {
            temperature_text: timeutil::format_temperature(
                current.air_temperature,
                opts.use_fahrenheit,
            ),
            icon_name: weather_icon_name(symbol).to_string(),
            symbol_fallback,
            max_text,
            min_text,
            wind_text: format!(
                "Wind: {:.1}m/s {}",
                current.wind_speed,
                timeutil::compass_point(current.wind_from_direction)
            ),
            humidity_text: format!("RH: {:.0}%", current.relative_humidity),
            pressure_text: format!("P: {:.0}hPa", current.air_pressure),
            updated_text: format!(
                "updated: {}",
                timeutil::format_clock(stamp, opts.timezone_offset)
            ),
            date_lines: timeutil::format_date_lines(stamp, opts.timezone_offset),
            battery_icon,
            battery_text,
            bars: summary.bars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::power::BatteryReading;
    use serde_json::json;

    fn sample_series() -> ForecastSeries {
        let doc = json!({
            "properties": {
                "meta": { "updated_at": "2025-08-28T11:30:00Z" },
                "timeseries": [{
                    "time": "2025-08-28T12:00:00Z",
                    "data": {
                        "instant": { "details": {
                            "air_temperature": 12.3,
                            "wind_speed": 3.4,
                            "wind_from_direction": 200.0,
                            "relative_humidity": 54.6,
                            "air_pressure_at_sea_level": 1013.2
                        }},
                        "next_6_hours": {
                            "summary": { "symbol_code": "partlycloudy_day" },
                            "details": { "precipitation_amount": 0.0 }
                        }
                    }
                }]
            }
        });
        ForecastSeries::from_value(&doc).unwrap()
    }

    fn healthy_battery() -> Result<BatteryReading, PowerError> {
        Ok(BatteryReading { volts: 4.18, external_power: false })
    }

    #[test]
    fn resolves_the_distilled_scenario() {
        let model = DisplayModel::build(
            &sample_series(),
            None,
            healthy_battery(),
            RenderOptions::default(),
        );
        assert_eq!(model.temperature_text, "12.3C");
        assert_eq!(model.icon_name, "partlycloudy");
        assert_eq!(model.symbol_fallback, "partlycloudy"); // 12-char budget
        assert_eq!(model.battery_icon, BatteryIcon::Full);
        assert_eq!(model.wind_text, "Wind: 3.4m/s SSW");
        assert_eq!(model.humidity_text, "RH: 55%");
        assert_eq!(model.pressure_text, "P: 1013hPa");
    }

    #[test]
    fn fahrenheit_option_converts_everywhere() {
        let opts = RenderOptions { timezone_offset: 0, use_fahrenheit: true };
        let model = DisplayModel::build(&sample_series(), None, healthy_battery(), opts);
        assert_eq!(model.temperature_text, "54.1F");
        // single point: min == max == 12.3C == 54.14F
        assert_eq!(model.max_text, "54.1\u{00b0}");
        assert_eq!(model.min_text, model.max_text);
    }

    #[test]
    fn fetched_at_header_supersedes_updated_at() {
        let model = DisplayModel::build(
            &sample_series(),
            Some("2025-08-28T19:57:24+00:00"),
            healthy_battery(),
            RenderOptions::default(),
        );
        assert_eq!(model.updated_text, "updated: 19:57");

        let model = DisplayModel::build(
            &sample_series(),
            None,
            healthy_battery(),
            RenderOptions::default(),
        );
        assert_eq!(model.updated_text, "updated: 11:30");
    }

    #[test]
    fn battery_fault_degrades_to_alert() {
        let model = DisplayModel::build(
            &sample_series(),
            None,
            Err(PowerError::Gauge("adc timeout".into())),
            RenderOptions::default(),
        );
        assert_eq!(model.battery_icon, BatteryIcon::Alert);
        assert_eq!(model.battery_text, "?.?V");
    }

    #[test]
    fn long_symbol_codes_truncate_for_fallback() {
        let doc = json!({
            "properties": {
                "meta": { "updated_at": "2025-08-28T11:30:00Z" },
                "timeseries": [{
                    "time": "2025-08-28T12:00:00Z",
                    "data": {
                        "instant": { "details": { "air_temperature": 1.0 } },
                        "next_1_hours": {
                            "summary": { "symbol_code": "heavysnowshowersandthunder_day" }
                        }
                    }
                }]
            }
        });
        let series = ForecastSeries::from_value(&doc).unwrap();
        let model = DisplayModel::build(
            &series,
            None,
            healthy_battery(),
            RenderOptions::default(),
        );
        assert_eq!(model.symbol_fallback, "heavysnowsho");
        assert_eq!(model.icon_name, "chancetstorms");
    }

    #[test]
    fn missing_symbol_classifies_unknown() {
        let doc = json!({
            "properties": {
                "meta": { "updated_at": "2025-08-28T11:30:00Z" },
                "timeseries": [{
                    "time": "2025-08-28T12:00:00Z",
                    "data": { "instant": { "details": { "air_temperature": 1.0 } } }
                }]
            }
        });
        let series = ForecastSeries::from_value(&doc).unwrap();
        let model = DisplayModel::build(
            &series,
            None,
            healthy_battery(),
            RenderOptions::default(),
        );
        assert_eq!(model.icon_name, "unknown");
        assert_eq!(model.symbol_fallback, "unknown");
    }

    #[test]
    fn notice_lines_are_two_each() {
        assert_eq!(Notice::ConnectionFailed.lines().lines().count(), 2);
        assert_eq!(Notice::DataUnavailable.lines().lines().count(), 2);
    }
}
