//! # Station metadata and epicentral geometry
//!
//! A [`Station`] carries the receiver coordinates and the code triple that forms the
//! `NET.STA.LOC` identifier used as the key of the pick/window caches and of the weight table.
//!
//! The geometry helpers work on a spherical earth of mean radius
//! [`MEAN_EARTH_RADIUS`](crate::constants::MEAN_EARTH_RADIUS): great-circle distance and
//! event-to-station azimuth from [`distance_azimuth`], and the meters → epicentral-degrees
//! conversion [`m_to_deg`] expected by travel-time models.

use crate::constants::{Degree, Meter, StationId, MEAN_EARTH_RADIUS};
use crate::event::Origin;

/// Receiver metadata: code triple and geodetic coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Network code (e.g. `II`)
    pub network: String,
    /// Station code (e.g. `KDAK`)
    pub name: String,
    /// Location code, possibly empty
    pub location: String,
    /// Latitude in degrees
    pub latitude: Degree,
    /// Longitude in degrees
    pub longitude: Degree,
    /// Elevation above sea level in meters
    pub elevation_m: Meter,
}

impl Station {
    pub fn new(
        network: &str,
        name: &str,
        location: &str,
        latitude: Degree,
        longitude: Degree,
        elevation_m: Meter,
    ) -> Self {
        Station {
            network: network.to_string(),
            name: name.to_string(),
            location: location.to_string(),
            latitude,
            longitude,
            elevation_m,
        }
    }

    /// The `NET.STA.LOC` identifier keying caches and weight tables.
    pub fn id(&self) -> StationId {
        format!("{}.{}.{}", self.network, self.name, self.location)
    }
}

/// Great-circle distance (meters) and azimuth (degrees, clockwise from north)
/// from the event origin to the station.
pub fn distance_azimuth(origin: &Origin, station: &Station) -> (Meter, Degree) {
    let phi1 = origin.latitude.to_radians();
    let phi2 = station.latitude.to_radians();
    let dphi = (station.latitude - origin.latitude).to_radians();
    let dlambda = (station.longitude - origin.longitude).to_radians();

    // haversine distance
    let a = (dphi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    let distance = MEAN_EARTH_RADIUS * c;

    // initial bearing, normalized to [0, 360)
    let azimuth = (dlambda.sin() * phi2.cos())
        .atan2(phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos())
        .to_degrees()
        .rem_euclid(360.0);

    (distance, azimuth)
}

/// Convert a distance in meters to epicentral degrees.
pub fn m_to_deg(distance: Meter) -> Degree {
    distance * 360.0 / (std::f64::consts::TAU * MEAN_EARTH_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hifitime::Epoch;

    fn origin_at(lat: f64, lon: f64) -> Origin {
        Origin::new(Epoch::from_gregorian_utc(2009, 4, 7, 20, 12, 55, 0), lat, lon, 0.0)
    }

    #[test]
    fn test_station_id() {
        let sta = Station::new("II", "KDAK", "00", 57.78, -152.58, 152.0);
        assert_eq!(sta.id(), "II.KDAK.00");

        let sta = Station::new("AK", "SAW", "", 61.81, -148.33, 0.0);
        assert_eq!(sta.id(), "AK.SAW.");
    }

    #[test]
    fn test_one_degree_along_meridian() {
        let origin = origin_at(0.0, 0.0);
        let sta = Station::new("XX", "N1", "", 1.0, 0.0, 0.0);
        let (dist, az) = distance_azimuth(&origin, &sta);
        // one degree of arc on the mean sphere
        assert_relative_eq!(dist, MEAN_EARTH_RADIUS * 1.0_f64.to_radians(), epsilon = 1e-6);
        assert_relative_eq!(az, 0.0, epsilon = 1e-9);
        assert_relative_eq!(m_to_deg(dist), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_azimuth_quadrants() {
        let origin = origin_at(0.0, 0.0);
        let east = Station::new("XX", "E1", "", 0.0, 1.0, 0.0);
        let south = Station::new("XX", "S1", "", -1.0, 0.0, 0.0);
        let west = Station::new("XX", "W1", "", 0.0, -1.0, 0.0);
        assert_relative_eq!(distance_azimuth(&origin, &east).1, 90.0, epsilon = 1e-9);
        assert_relative_eq!(distance_azimuth(&origin, &south).1, 180.0, epsilon = 1e-9);
        assert_relative_eq!(distance_azimuth(&origin, &west).1, 270.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_distance() {
        let origin = origin_at(45.0, 45.0);
        let sta = Station::new("XX", "Z0", "", 45.0, 45.0, 0.0);
        let (dist, _) = distance_azimuth(&origin, &sta);
        assert_relative_eq!(dist, 0.0, epsilon = 1e-9);
    }
}
