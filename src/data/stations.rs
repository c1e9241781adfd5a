//! Static directory of ZiaMet stations
//!
//! The synthetic generator produces one snapshot per entry, in this order.

use super::StationSite;

/// Static array of the network's stations with their coordinates
pub static STATIONS: [StationSite; 8] = [
    StationSite {
        name: "NMSU Main Campus",
        location: "Las Cruces, NM",
        latitude: 32.2821,
        longitude: -106.7505,
    },
    StationSite {
        name: "Fabian Garcia RC",
        location: "Las Cruces, NM",
        latitude: 32.2797,
        longitude: -106.7648,
    },
    StationSite {
        name: "Leyendecker II PSRC",
        location: "Las Cruces, NM",
        latitude: 32.2014,
        longitude: -106.7456,
    },
    StationSite {
        name: "Chihuahuan Desert RRC",
        location: "Las Cruces, NM",
        latitude: 32.5332,
        longitude: -106.7516,
    },
    StationSite {
        name: "Alcalde ASC",
        location: "Alcalde, NM",
        latitude: 36.0895,
        longitude: -106.0545,
    },
    StationSite {
        name: "Farmington ASC",
        location: "Farmington, NM",
        latitude: 36.6872,
        longitude: -108.2862,
    },
    StationSite {
        name: "Los Lunas ASC",
        location: "Los Lunas, NM",
        latitude: 34.7709,
        longitude: -106.7634,
    },
    StationSite {
        name: "Tucumcari ASC",
        location: "Tucumcari, NM",
        latitude: 35.2017,
        longitude: -103.6897,
    },
];

/// Returns a slice of all stations in directory order
pub fn all_stations() -> &'static [StationSite] {
    &STATIONS
}

/// Builds the snapshot id for the station at `index`
pub fn station_id(index: usize) -> String {
    format!("station-{}", index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_stations_returns_8() {
        assert_eq!(all_stations().len(), 8);
    }

    #[test]
    fn test_first_station_is_main_campus() {
        let first = &all_stations()[0];
        assert_eq!(first.name, "NMSU Main Campus");
        assert_eq!(first.location, "Las Cruces, NM");
    }

    #[test]
    fn test_station_id_matches_directory_index() {
        assert_eq!(station_id(5), "station-5");
        assert_eq!(all_stations()[5].name, "Farmington ASC");
    }

    #[test]
    fn test_all_stations_have_unique_names() {
        let mut names: Vec<&str> = all_stations().iter().map(|s| s.name).collect();
        names.sort();
        let original_len = names.len();
        names.dedup();
        assert_eq!(names.len(), original_len, "Station names are not unique");
    }

    #[test]
    fn test_all_stations_are_in_new_mexico() {
        for station in all_stations() {
            assert!(
                (31.3..37.0).contains(&station.latitude),
                "{} latitude out of range",
                station.name
            );
            assert!(
                (-109.1..-103.0).contains(&station.longitude),
                "{} longitude out of range",
                station.name
            );
            assert!(station.location.ends_with(", NM"));
        }
    }
}
