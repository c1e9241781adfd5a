//! Synthetic station readings
//!
//! Stands in for the station API. Values are random on every call, the shape
//! (station set, ids, field set, trend length) never changes.

use chrono::Local;
use rand::Rng;

use super::stations::{all_stations, station_id};
use super::{CompassDirection, StationSite, StationSnapshot, TrendPoint};

/// Number of points in every synthetic trend series
pub const TREND_LENGTH: usize = 12;

/// Simulated hours between consecutive trend points
const TREND_STEP_HOURS: usize = 2;

/// Wind directions the generator picks from
const WIND_DIRECTIONS: [CompassDirection; 4] = [
    CompassDirection::SW,
    CompassDirection::W,
    CompassDirection::NW,
    CompassDirection::S,
];

/// Generates one snapshot per directory station with fresh random readings
pub fn generate_mock_stations() -> Vec<StationSnapshot> {
    let mut rng = rand::thread_rng();
    let last_updated = Local::now().format("%H:%M").to_string();

    all_stations()
        .iter()
        .enumerate()
        .map(|(i, site)| mock_snapshot(&mut rng, i, site, &last_updated))
        .collect()
}

fn mock_snapshot<R: Rng>(
    rng: &mut R,
    index: usize,
    site: &StationSite,
    last_updated: &str,
) -> StationSnapshot {
    StationSnapshot {
        id: station_id(index),
        name: site.name.to_string(),
        location: site.location.to_string(),
        latitude: site.latitude,
        longitude: site.longitude,
        current_temp: rng.gen_range(60.0..70.0),
        humidity: rng.gen_range(15.0..25.0),
        wind_speed: rng.gen_range(4.0..9.0),
        wind_direction: WIND_DIRECTIONS[rng.gen_range(0..WIND_DIRECTIONS.len())].clone(),
        high_temp: rng.gen_range(70.0..75.0),
        low_temp: rng.gen_range(40.0..45.0),
        dew_point: rng.gen_range(10.0..20.0),
        peak_gust: rng.gen_range(10.0..20.0),
        solar_rad: rng.gen_range(800.0..900.0),
        soil_temp: rng.gen_range(55.0..60.0),
        last_updated: last_updated.to_string(),
        trends: mock_trends(rng),
    }
}

/// Sinusoidal temperature with jitter, noisy wind, labels every 2 hours
fn mock_trends<R: Rng>(rng: &mut R) -> Vec<TrendPoint> {
    (0..TREND_LENGTH)
        .map(|j| TrendPoint {
            time: format!("{}:00", j * TREND_STEP_HOURS),
            temp: 45.0 + (j as f64 / 2.0).sin() * 20.0 + rng.gen_range(0.0..5.0),
            wind: 5.0 + rng.gen_range(0.0..10.0),
        })
        .collect()
}
