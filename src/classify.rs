/*
 *  classify.rs
 *
 *  inkcast - e-paper weather board
 *  (c) 2025-26 Stuart Hunter
 *
 *  Symbol-code -> icon and battery-voltage -> icon classification.
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

/// Icon identifier returned for symbol codes the table does not know.
pub const UNKNOWN_ICON: &str = "unknown";

/// Maps an upstream symbol code (day/night suffix included) to an icon
/// asset name. Total over its domain: anything unrecognized classifies
/// as [`UNKNOWN_ICON`]. Whether the named asset actually exists is the
/// layout engine's problem, not ours.
pub fn weather_icon_name(symbol_code: &str) -> &'static str {
    match symbol_code {
        "clearsky_day" => "clear",
        "clearsky_night" => "nt_clear",
        "cloudy" => "cloudy",
        "fair_day" => "partlysunny",
        "fair_night" => "nt_partlysunny",
        "fog" => "fog",
        "partlycloudy_day" => "partlycloudy",
        "partlycloudy_night" => "nt_partlycloudy",

        "rain" | "lightrain" | "heavyrain" => "rain",

        "sleet" | "lightsleet" | "heavysleet" => "sleet",

        "snow" | "lightsnow" | "heavysnow" => "snow",

        "rainshowers_day"
        | "lightrainshowers_day"
        | "heavyrainshowers_day" => "chancerain",
        "rainshowers_night"
        | "lightrainshowers_night"
        | "heavyrainshowers_night" => "nt_chancerain",

        "sleetshowers_day"
        | "lightsleetshowers_day"
        | "heavysleetshowers_day" => "chancesleet",
        "sleetshowers_night"
        | "lightsleetshowers_night"
        | "heavysleetshowers_night" => "nt_chancesleet",

        "snowshowers_day"
        | "lightsnowshowers_day"
        | "heavysnowshowers_day" => "chancesnow",
        "snowshowers_night"
        | "lightsnowshowers_night"
        | "heavysnowshowers_night" => "nt_chancesnow",

        "rainandthunder"
        | "lightrainandthunder"
        | "heavyrainandthunder"
        | "sleetandthunder"
        | "lightsleetandthunder"
        | "heavysleetandthunder"
        | "snowandthunder"
        | "lightsnowandthunder"
        | "heavysnowandthunder" => "tstorms",

        "rainshowersandthunder_day"
        | "lightrainshowersandthunder_day"
        | "heavyrainshowersandthunder_day"
        | "sleetshowersandthunder_day"
        | "lightssleetshowersandthunder_day"
        | "heavysleetshowersandthunder_day"
        | "snowshowersandthunder_day"
        | "lightssnowshowersandthunder_day"
        | "heavysnowshowersandthunder_day" => "chancetstorms",
        "rainshowersandthunder_night"
        | "lightrainshowersandthunder_night"
        | "heavyrainshowersandthunder_night"
        | "sleetshowersandthunder_night"
        | "lightssleetshowersandthunder_night"
        | "heavysleetshowersandthunder_night"
        | "snowshowersandthunder_night"
        | "lightssnowshowersandthunder_night"
        | "heavysnowshowersandthunder_night" => "nt_chancetstorms",

        _ => UNKNOWN_ICON,
    }
}

/// Discrete battery charge bucket, worst case last. The ladder follows a
/// typical Li-ion discharge curve: 3.30V empty, 4.20V full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryIcon {
    Charging,
    Full,
    SixBars,
    FiveBars,
    FourBars,
    ThreeBars,
    TwoBars,
    OneBar,
    ZeroBars,
    Alert,
}

impl BatteryIcon {
    /// Classifies a voltage reading, descending threshold ladder.
    /// External power wins outright - a charging pack reads high anyway.
    pub fn classify(volts: f64, external_power: bool) -> Self {
        if external_power {
            return Self::Charging;
        }
        if volts >= 4.15 {
            Self::Full // ~95-100%
        } else if volts >= 4.05 {
            Self::SixBars // ~85-95%
        } else if volts >= 3.95 {
            Self::FiveBars // ~70-85%
        } else if volts >= 3.87 {
            Self::FourBars // ~55-70%
        } else if volts >= 3.82 {
            Self::ThreeBars // ~40-55%
        } else if volts >= 3.77 {
            Self::TwoBars // ~25-40%
        } else if volts >= 3.70 {
            Self::OneBar // ~10-25%
        } else if volts >= 3.50 {
            Self::ZeroBars // ~5-10%, very low but not dead
        } else {
            Self::Alert // may brownout
        }
    }

    /// Asset name under the icon store, sans extension.
    pub fn asset_name(&self) -> &'static str {
        match self {
            Self::Charging => "battery_charging_full_90deg",
            Self::Full => "battery_full_90deg",
            Self::SixBars => "battery_6_bar_90deg",
            Self::FiveBars => "battery_5_bar_90deg",
            Self::FourBars => "battery_4_bar_90deg",
            Self::ThreeBars => "battery_3_bar_90deg",
            Self::TwoBars => "battery_2_bar_90deg",
            Self::OneBar => "battery_1_bar_90deg",
            Self::ZeroBars => "battery_0_bar_90deg",
            Self::Alert => "battery_alert_90deg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_night_variants_resolve_separately() {
        assert_eq!(weather_icon_name("partlycloudy_day"), "partlycloudy");
        assert_eq!(weather_icon_name("partlycloudy_night"), "nt_partlycloudy");
        assert_eq!(weather_icon_name("clearsky_night"), "nt_clear");
    }

    #[test]
    fn suffix_free_codes_resolve() {
        assert_eq!(weather_icon_name("cloudy"), "cloudy");
        assert_eq!(weather_icon_name("heavyrain"), "rain");
        assert_eq!(weather_icon_name("sleetandthunder"), "tstorms");
    }

    #[test]
    fn unknown_codes_never_fault() {
        assert_eq!(weather_icon_name("volcanic_ash"), UNKNOWN_ICON);
        assert_eq!(weather_icon_name(""), UNKNOWN_ICON);
        // a known stem with the wrong suffix is still unknown
        assert_eq!(weather_icon_name("partlycloudy_noon"), UNKNOWN_ICON);
    }

    #[test]
    fn full_at_top_of_ladder() {
        assert_eq!(BatteryIcon::classify(4.18, false), BatteryIcon::Full);
        assert_eq!(BatteryIcon::classify(4.15, false), BatteryIcon::Full);
        assert_eq!(BatteryIcon::classify(9.0, false), BatteryIcon::Full);
    }

    #[test]
    fn alert_below_lowest_threshold() {
        assert_eq!(BatteryIcon::classify(3.49, false), BatteryIcon::Alert);
        assert_eq!(BatteryIcon::classify(0.0, false), BatteryIcon::Alert);
    }

    #[test]
    fn ladder_buckets_at_boundaries() {
        assert_eq!(BatteryIcon::classify(4.14, false), BatteryIcon::SixBars);
        assert_eq!(BatteryIcon::classify(3.95, false), BatteryIcon::FiveBars);
        assert_eq!(BatteryIcon::classify(3.87, false), BatteryIcon::FourBars);
        assert_eq!(BatteryIcon::classify(3.82, false), BatteryIcon::ThreeBars);
        assert_eq!(BatteryIcon::classify(3.77, false), BatteryIcon::TwoBars);
        assert_eq!(BatteryIcon::classify(3.70, false), BatteryIcon::OneBar);
        assert_eq!(BatteryIcon::classify(3.50, false), BatteryIcon::ZeroBars);
    }

    #[test]
    fn external_power_always_charges() {
        assert_eq!(BatteryIcon::classify(4.18, true), BatteryIcon::Charging);
        assert_eq!(BatteryIcon::classify(3.1, true), BatteryIcon::Charging);
    }

    #[test]
    fn asset_names_match_store_layout() {
        assert_eq!(BatteryIcon::Full.asset_name(), "battery_full_90deg");
        assert_eq!(BatteryIcon::Alert.asset_name(), "battery_alert_90deg");
        assert_eq!(
            BatteryIcon::Charging.asset_name(),
            "battery_charging_full_90deg"
        );
    }
}
