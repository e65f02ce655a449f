//! Derived forecast series: min/max over a bounded window plus the
//! per-hour temperature/precipitation pairs feeding the histogram strip.

use crate::forecast::ForecastSeries;

/// Points scanned for the min/max temperature summary.
pub const MINMAX_WINDOW: usize = 24;
/// Points feeding the histogram strip (one column each).
pub const HISTOGRAM_WINDOW: usize = 16;

/// One histogram column: air temperature plus the precipitation expected
/// over the following hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyBar {
    pub temperature: f64,
    pub precipitation: f64,
}

/// Deterministic reduction of a forecast series for display.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSummary {
    /// (min, max) over the first MINMAX_WINDOW points; `None` is the
    /// "no data" sentinel and must never render as a temperature.
    pub min_max: Option<(f64, f64)>,
    pub bars: Vec<HourlyBar>,
}

impl DerivedSummary {
    pub fn from_series(series: &ForecastSeries) -> Self {
        let points = series.points();

        let mut min_max: Option<(f64, f64)> = None;
        for p in points.iter().take(MINMAX_WINDOW) {
            min_max = Some(match min_max {
                None => (p.air_temperature, p.air_temperature),
                Some((lo, hi)) => (lo.min(p.air_temperature), hi.max(p.air_temperature)),
            });
        }

        let bars = points
            .iter()
            .take(HISTOGRAM_WINDOW)
            .map(|p| HourlyBar {
                temperature: p.air_temperature,
                precipitation: p.precipitation_next_hour.max(0.0),
            })
            .collect();

        Self { min_max, bars }
    }
}

/// Pixel scaling for the histogram strip. Divisors are floored at 1 so a
/// flat temperature window or an all-dry window never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarScale {
    midpoint: f64,
    range: f64,
    precipitation_max: f64,
}

impl BarScale {
    /// `None` when there are no bars to scale.
    pub fn for_bars(bars: &[HourlyBar]) -> Option<Self> {
        let first = bars.first()?;
        let (mut lo, mut hi) = (first.temperature, first.temperature);
        let mut wet = 0.0f64;
        for bar in bars {
            lo = lo.min(bar.temperature);
            hi = hi.max(bar.temperature);
            wet = wet.max(bar.precipitation);
        }
        Some(Self {
            midpoint: (lo + hi) / 2.0,
            range: if hi > lo { hi - lo } else { 1.0 },
            precipitation_max: if wet > 0.0 { wet } else { 1.0 },
        })
    }

    /// Signed pixel offset from the strip midline for a temperature bar;
    /// positive grows upward. Symmetric about the window midpoint.
    pub fn temperature_offset(&self, temperature: f64, half_height: u32) -> i32 {
        ((temperature - self.midpoint) / self.range * half_height as f64).round() as i32
    }

    /// Precipitation column height in pixels: linear against the window
    /// maximum, and any nonzero precipitation is at least one pixel tall.
    pub fn precipitation_height(&self, precipitation: f64, strip_height: u32) -> u32 {
        if precipitation <= 0.0 {
            return 0;
        }
        let px = (precipitation / self.precipitation_max * strip_height as f64) as u32;
        px.clamp(1, strip_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::ForecastSeries;
    use serde_json::json;

    fn series_with_temps(temps: &[f64]) -> ForecastSeries {
        let entries: Vec<_> = temps
            .iter()
            .map(|t| {
                json!({
                    "time": "2025-08-28T12:00:00Z",
                    "data": { "instant": { "details": { "air_temperature": t } } }
                })
            })
            .collect();
        let doc = json!({
            "properties": {
                "meta": { "updated_at": "2025-08-28T11:30:00Z" },
                "timeseries": entries
            }
        });
        ForecastSeries::from_value(&doc).unwrap()
    }

    fn bars(pairs: &[(f64, f64)]) -> Vec<HourlyBar> {
        pairs
            .iter()
            .map(|&(temperature, precipitation)| HourlyBar { temperature, precipitation })
            .collect()
    }

    #[test]
    fn min_max_ordering_holds() {
        let summary = DerivedSummary::from_series(&series_with_temps(&[12.0, 8.5, 17.2, 10.0]));
        let (lo, hi) = summary.min_max.unwrap();
        assert_eq!(lo, 8.5);
        assert_eq!(hi, 17.2);
        assert!(lo <= hi);
    }

    #[test]
    fn min_max_window_is_bounded() {
        let temps: Vec<f64> = (0..48).map(|i| i as f64).collect();
        let summary = DerivedSummary::from_series(&series_with_temps(&temps));
        // hour 47 is outside the 24-point window
        assert_eq!(summary.min_max.unwrap(), (0.0, 23.0));
        assert_eq!(summary.bars.len(), HISTOGRAM_WINDOW);
    }

    #[test]
    fn short_series_uses_what_there_is() {
        let summary = DerivedSummary::from_series(&series_with_temps(&[4.0, 6.0]));
        assert_eq!(summary.min_max.unwrap(), (4.0, 6.0));
        assert_eq!(summary.bars.len(), 2);
    }

    #[test]
    fn empty_bars_have_no_scale() {
        assert_eq!(BarScale::for_bars(&[]), None);
    }

    #[test]
    fn flat_window_does_not_divide_by_zero() {
        let scale = BarScale::for_bars(&bars(&[(10.0, 0.0), (10.0, 0.0)])).unwrap();
        assert_eq!(scale.temperature_offset(10.0, 6), 0);
        assert_eq!(scale.temperature_offset(10.5, 6), 3);
    }

    #[test]
    fn temperature_bars_are_symmetric_about_midpoint() {
        let scale = BarScale::for_bars(&bars(&[(0.0, 0.0), (10.0, 0.0)])).unwrap();
        assert_eq!(scale.temperature_offset(10.0, 6), 6);
        assert_eq!(scale.temperature_offset(0.0, 6), -6);
        assert_eq!(scale.temperature_offset(5.0, 6), 0);
    }

    #[test]
    fn precipitation_height_is_monotonic_with_visibility_floor() {
        let scale = BarScale::for_bars(&bars(&[(5.0, 0.05), (5.0, 2.0), (5.0, 4.0)])).unwrap();
        let h = |p| scale.precipitation_height(p, 12);
        assert_eq!(h(0.0), 0);
        assert_eq!(h(0.05), 1); // visible even when a rounding would drop it
        assert!(h(0.05) <= h(2.0) && h(2.0) <= h(4.0));
        assert_eq!(h(4.0), 12);
    }

    #[test]
    fn dry_window_keeps_unit_divisor() {
        let scale = BarScale::for_bars(&bars(&[(5.0, 0.0)])).unwrap();
        assert_eq!(scale.precipitation_height(0.0, 12), 0);
        // a hypothetical 0.5mm against the unit floor scales linearly
        assert_eq!(scale.precipitation_height(0.5, 12), 6);
    }
}
