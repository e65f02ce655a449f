/*
 *  forecast.rs
 *
 *  inkcast - e-paper weather board
 *  (c) 2025-26 Stuart Hunter
 *
 *  Typed extraction of the locationforecast "compact" payload.
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

use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;
use serde_json::Value;

/// One timestamped sample, flattened from the API's nested entry.
/// Immutable once parsed; owned by the cycle that parsed it.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub air_temperature: f64,
    pub wind_speed: f64,
    pub wind_from_direction: f64,
    pub relative_humidity: f64,
    pub air_pressure: f64,
    /// Precipitation expected over the following hour, 0 when the
    /// one-hour block is absent.
    pub precipitation_next_hour: f64,
    /// Condition symbol, first available across the look-ahead windows.
    pub symbol_code: Option<String>,
}

/// Timestamp-ordered samples as returned upstream. Always non-empty:
/// an empty or malformed payload parses to the "unavailable" state
/// (`None`), never to an empty series.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
    /// `meta.updated_at` from the payload, ISO-8601.
    pub updated_at: String,
}

// --- wire model ---------------------------------------------------------
// Everything beyond the instant air temperature degrades through
// `serde(default)` instead of failing the whole document.

#[derive(Debug, Deserialize)]
struct CompactDocument {
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Properties {
    meta: Meta,
    timeseries: Vec<TimeStep>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    updated_at: String,
}

#[derive(Debug, Deserialize)]
struct TimeStep {
    time: String,
    data: StepData,
}

#[derive(Debug, Deserialize)]
struct StepData {
    instant: Instant,
    #[serde(default)]
    next_1_hours: Option<LookAhead>,
    #[serde(default)]
    next_6_hours: Option<LookAhead>,
    #[serde(default)]
    next_12_hours: Option<LookAhead>,
}

#[derive(Debug, Deserialize)]
struct Instant {
    details: InstantDetails,
}

#[derive(Debug, Deserialize)]
struct InstantDetails {
    air_temperature: f64,
    #[serde(default)]
    wind_speed: f64,
    #[serde(default)]
    wind_from_direction: f64,
    #[serde(default)]
    relative_humidity: f64,
    #[serde(default)]
    air_pressure_at_sea_level: f64,
}

/// Aggregate block for the next N hours from a given sample.
#[derive(Debug, Deserialize)]
struct LookAhead {
    #[serde(default)]
    summary: Option<LookAheadSummary>,
    #[serde(default)]
    details: Option<LookAheadDetails>,
}

#[derive(Debug, Deserialize)]
struct LookAheadSummary {
    symbol_code: String,
}

#[derive(Debug, Default, Deserialize)]
struct LookAheadDetails {
    #[serde(default)]
    precipitation_amount: f64,
}

impl LookAhead {
    fn symbol(&self) -> Option<&str> {
        self.summary.as_ref().map(|s| s.symbol_code.as_str())
    }

    fn precipitation(&self) -> f64 {
        self.details
            .as_ref()
            .map(|d| d.precipitation_amount)
            .unwrap_or(0.0)
    }
}

impl StepData {
    /// First available symbol code, nearest look-ahead window preferred.
    fn symbol_code(&self) -> Option<String> {
        [&self.next_1_hours, &self.next_6_hours, &self.next_12_hours]
            .into_iter()
            .flatten()
            .find_map(|w| w.symbol().map(str::to_string))
    }
}

impl ForecastSeries {
    /// Parses a raw payload into a series, or `None` when the payload is
    /// structurally unusable. Every mismatch is absorbed here; nothing
    /// past this boundary sees a malformed document.
    pub fn from_value(payload: &Value) -> Option<Self> {
        let doc: CompactDocument = match serde_json::from_value(payload.clone()) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("forecast payload rejected: {}", e);
                return None;
            }
        };

        let mut points = Vec::with_capacity(doc.properties.timeseries.len());
        for step in &doc.properties.timeseries {
            let timestamp = match DateTime::parse_from_rfc3339(&step.time) {
                Ok(ts) => ts.with_timezone(&Utc),
                Err(e) => {
                    warn!("forecast entry has bad timestamp {:?}: {}", step.time, e);
                    return None;
                }
            };
            let details = &step.data.instant.details;
            points.push(ForecastPoint {
                timestamp,
                air_temperature: details.air_temperature,
                wind_speed: details.wind_speed,
                wind_from_direction: details.wind_from_direction,
                relative_humidity: details.relative_humidity,
                air_pressure: details.air_pressure_at_sea_level,
                precipitation_next_hour: step
                    .data
                    .next_1_hours
                    .as_ref()
                    .map(LookAhead::precipitation)
                    .unwrap_or(0.0),
                symbol_code: step.data.symbol_code(),
            });
        }

        if points.is_empty() {
            warn!("forecast payload has an empty timeseries");
            return None;
        }

        Some(Self {
            points,
            updated_at: doc.properties.meta.updated_at,
        })
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// The sample describing "now" - the first entry by upstream contract.
    pub fn current(&self) -> &ForecastPoint {
        &self.points[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(temp: f64) -> Value {
        json!({
            "time": "2025-08-28T12:00:00Z",
            "data": {
                "instant": { "details": { "air_temperature": temp } }
            }
        })
    }

    fn document(entries: Vec<Value>) -> Value {
        json!({
            "properties": {
                "meta": { "updated_at": "2025-08-28T11:30:00Z" },
                "timeseries": entries
            }
        })
    }

    #[test]
    fn parses_minimal_entry_with_defaults() {
        let series = ForecastSeries::from_value(&document(vec![entry(12.3)])).unwrap();
        let p = series.current();
        assert_eq!(p.air_temperature, 12.3);
        assert_eq!(p.wind_speed, 0.0);
        assert_eq!(p.precipitation_next_hour, 0.0);
        assert_eq!(p.symbol_code, None);
        assert_eq!(series.updated_at, "2025-08-28T11:30:00Z");
    }

    #[test]
    fn symbol_prefers_nearest_window() {
        let mut e = entry(5.0);
        e["data"]["next_1_hours"] =
            json!({ "summary": { "symbol_code": "cloudy" }, "details": {} });
        e["data"]["next_6_hours"] =
            json!({ "summary": { "symbol_code": "rain" }, "details": {} });
        let series = ForecastSeries::from_value(&document(vec![e])).unwrap();
        assert_eq!(series.current().symbol_code.as_deref(), Some("cloudy"));
    }

    #[test]
    fn symbol_falls_back_to_wider_windows() {
        let mut e = entry(12.3);
        e["data"]["next_6_hours"] = json!({
            "summary": { "symbol_code": "partlycloudy_day" },
            "details": { "precipitation_amount": 0.4 }
        });
        let series = ForecastSeries::from_value(&document(vec![e])).unwrap();
        let p = series.current();
        assert_eq!(p.symbol_code.as_deref(), Some("partlycloudy_day"));
        // one-hour precipitation stays 0; the six-hour amount is not hourly
        assert_eq!(p.precipitation_next_hour, 0.0);
    }

    #[test]
    fn hourly_precipitation_comes_from_one_hour_block() {
        let mut e = entry(5.0);
        e["data"]["next_1_hours"] =
            json!({ "details": { "precipitation_amount": 1.2 } });
        let series = ForecastSeries::from_value(&document(vec![e])).unwrap();
        assert_eq!(series.current().precipitation_next_hour, 1.2);
    }

    #[test]
    fn empty_timeseries_is_unavailable() {
        assert!(ForecastSeries::from_value(&document(vec![])).is_none());
    }

    #[test]
    fn missing_air_temperature_is_unavailable() {
        let e = json!({
            "time": "2025-08-28T12:00:00Z",
            "data": { "instant": { "details": {} } }
        });
        assert!(ForecastSeries::from_value(&document(vec![e])).is_none());
    }

    #[test]
    fn structural_garbage_is_unavailable_not_a_panic() {
        assert!(ForecastSeries::from_value(&json!({ "hello": "world" })).is_none());
        assert!(ForecastSeries::from_value(&json!(42)).is_none());
        assert!(ForecastSeries::from_value(&json!(null)).is_none());
    }

    #[test]
    fn bad_timestamp_is_unavailable() {
        let mut e = entry(1.0);
        e["time"] = json!("noon-ish");
        assert!(ForecastSeries::from_value(&document(vec![e])).is_none());
    }
}
