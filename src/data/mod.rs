//! Core data models for the ZiaMet dashboard
//!
//! This module contains the station snapshot types shared by the data
//! provider, the view state and the UI, plus the synthetic generator and the
//! HTTP-backed provider.

pub mod mock;
pub mod provider;
pub mod stations;

pub use mock::generate_mock_stations;
pub use provider::{reconcile, FetchError, LivePolicy, StationClient, StationProvider};
pub use stations::all_stations;

use serde::{Deserialize, Serialize};

/// A station in the ZiaMet network directory
///
/// Uses `&'static str` so the directory can be a static array.
#[derive(Debug, Clone, Copy)]
pub struct StationSite {
    /// Human-readable station name
    pub name: &'static str,
    /// City and state the station sits in
    pub location: &'static str,
    /// Latitude coordinate
    pub latitude: f64,
    /// Longitude coordinate
    pub longitude: f64,
}

/// Compass label for wind direction
///
/// Stations report free-text labels. The eight principal points get their own
/// variants; anything else (16-point labels, "Calm") is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompassDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
    Other(String),
}

impl CompassDirection {
    /// Returns the display label (e.g. "SW")
    pub fn label(&self) -> &str {
        match self {
            CompassDirection::N => "N",
            CompassDirection::NE => "NE",
            CompassDirection::E => "E",
            CompassDirection::SE => "SE",
            CompassDirection::S => "S",
            CompassDirection::SW => "SW",
            CompassDirection::W => "W",
            CompassDirection::NW => "NW",
            CompassDirection::Other(label) => label,
        }
    }
}

impl From<String> for CompassDirection {
    fn from(label: String) -> Self {
        match label.trim().to_uppercase().as_str() {
            "N" => CompassDirection::N,
            "NE" => CompassDirection::NE,
            "E" => CompassDirection::E,
            "SE" => CompassDirection::SE,
            "S" => CompassDirection::S,
            "SW" => CompassDirection::SW,
            "W" => CompassDirection::W,
            "NW" => CompassDirection::NW,
            _ => CompassDirection::Other(label),
        }
    }
}

impl From<CompassDirection> for String {
    fn from(direction: CompassDirection) -> Self {
        match direction {
            CompassDirection::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl std::fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One point of a station's trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Display label for the sample time (e.g. "14:00")
    pub time: String,
    /// Temperature in °F
    pub temp: f64,
    /// Wind speed in mph
    pub wind: f64,
}

/// Readings for one weather station at fetch time
///
/// Snapshots are replaced wholesale on every refresh. The JSON form uses the
/// camelCase field names served by the station API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationSnapshot {
    /// Identifier, unique within one fetch result
    pub id: String,
    /// Human-readable station name
    pub name: String,
    /// Free-text location (e.g. "Las Cruces, NM")
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Current temperature in °F
    pub current_temp: f64,
    /// Relative humidity in %
    pub humidity: f64,
    /// Wind speed in mph
    pub wind_speed: f64,
    pub wind_direction: CompassDirection,
    /// Daily high in °F
    pub high_temp: f64,
    /// Daily low in °F
    pub low_temp: f64,
    /// Dew point in °F
    pub dew_point: f64,
    /// Peak gust in mph over the last hour
    pub peak_gust: f64,
    /// Global solar radiation in W/m²
    pub solar_rad: f64,
    /// Soil temperature in °F at 4 inch depth
    pub soil_temp: f64,
    /// Display-formatted update time, not meant to be parsed
    pub last_updated: String,
    /// Chronological trend series for charting
    pub trends: Vec<TrendPoint>,
}

impl StationSnapshot {
    /// Returns true if the name or location contains `needle_lower`
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.location.to_lowercase().contains(needle_lower)
    }

    /// External map link centred on the station
    pub fn map_url(&self) -> String {
        format!(
            "https://maps.google.com/maps?q={},{}&z=13",
            self.latitude, self.longitude
        )
    }
}

/// Which trend field the chart plots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasurementType {
    #[default]
    Temperature,
    WindSpeed,
}

/// A field of [`TrendPoint`] that can be plotted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendField {
    Temp,
    Wind,
}

impl TrendField {
    /// Reads this field from a trend point
    pub fn value(&self, point: &TrendPoint) -> f64 {
        match self {
            TrendField::Temp => point.temp,
            TrendField::Wind => point.wind,
        }
    }
}

impl MeasurementType {
    /// All measurement types in toggle order
    pub const fn all() -> &'static [MeasurementType] {
        &[MeasurementType::Temperature, MeasurementType::WindSpeed]
    }

    /// Display label as shown on the chart toggle
    pub fn label(&self) -> &'static str {
        match self {
            MeasurementType::Temperature => "Temperature",
            MeasurementType::WindSpeed => "Wind Speed",
        }
    }

    /// Unit suffix for chart axis labels
    pub fn unit(&self) -> &'static str {
        match self {
            MeasurementType::Temperature => "°F",
            MeasurementType::WindSpeed => "mph",
        }
    }

    /// The trend field plotted for this measurement
    pub fn trend_field(&self) -> TrendField {
        match self {
            MeasurementType::Temperature => TrendField::Temp,
            MeasurementType::WindSpeed => TrendField::Wind,
        }
    }

    /// The other measurement type
    pub fn toggled(&self) -> Self {
        match self {
            MeasurementType::Temperature => MeasurementType::WindSpeed,
            MeasurementType::WindSpeed => MeasurementType::Temperature,
        }
    }

    /// Parses a measurement name, accepting display labels and short aliases
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "temperature" | "temp" | "t" => Some(MeasurementType::Temperature),
            "wind speed" | "wind_speed" | "wind-speed" | "wind" | "w" => {
                Some(MeasurementType::WindSpeed)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns the stations whose name or location contains `term`, ignoring case
///
/// Order is preserved and an empty term returns every station.
pub fn filter_stations<'a>(
    stations: &'a [StationSnapshot],
    term: &str,
) -> Vec<&'a StationSnapshot> {
    let needle = term.to_lowercase();
    stations.iter().filter(|s| s.matches(&needle)).collect()
}
