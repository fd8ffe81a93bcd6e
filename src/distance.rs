//! Great-circle distance on a spherical Earth.

use crate::types::coordinate::Coordinate;

/// Mean Earth radius used for all distances, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates in kilometres, rounded to 0.1 km.
///
/// The `asin` argument is clamped to 1 so that floating point noise on
/// near-antipodal points can never produce `NaN`.
///
/// # Examples
///
/// ```
/// use gasofa::{distance_km, Coordinate};
///
/// let a = Coordinate::new(40.0, -3.0).unwrap();
/// let b = Coordinate::new(40.01, -3.0).unwrap();
/// assert_eq!(distance_km(a, b), 1.1);
/// assert_eq!(distance_km(a, a), 0.0);
/// ```
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.longitude() - a.longitude()).to_radians();

    let sin_lat = (d_lat / 2.0).sin();
    let sin_lon = (d_lon / 2.0).sin();
    let h = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lon * sin_lon;
    let c = 2.0 * h.sqrt().min(1.0).asin();

    round_to_tenth(EARTH_RADIUS_KM * c)
}

fn round_to_tenth(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use haversine::{distance, Location, Units};

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn identical_points_are_zero_apart() {
        for (lat, lon) in [(0.0, 0.0), (40.4168, -3.7038), (-89.9, 179.9), (90.0, 0.0)] {
            assert_eq!(distance_km(coord(lat, lon), coord(lat, lon)), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let points = [
            coord(40.0, -3.0),
            coord(41.3874, 2.1686),
            coord(28.1235, -15.4363),
            coord(-33.8688, 151.2093),
            coord(0.0, 180.0),
        ];
        for a in points {
            for b in points {
                assert_eq!(distance_km(a, b), distance_km(b, a));
            }
        }
    }

    #[test]
    fn antipodal_points_stay_finite() {
        let pairs = [
            (coord(0.0, 0.0), coord(0.0, 180.0)),
            (coord(90.0, 0.0), coord(-90.0, 0.0)),
            (coord(40.0, -3.0), coord(-40.0, 177.0)),
            (coord(0.0, -180.0), coord(0.0, 180.0)),
        ];
        for (a, b) in pairs {
            let d = distance_km(a, b);
            assert!(d.is_finite(), "{:?} -> {:?} gave {}", a, b, d);
            assert!(d >= 0.0);
            assert!(d <= 20015.1, "{} exceeds half the circumference", d);
        }
        assert_eq!(distance_km(coord(0.0, 0.0), coord(0.0, 180.0)), 20015.1);
    }

    #[test]
    fn results_are_rounded_to_one_decimal() {
        let d = distance_km(coord(40.4168, -3.7038), coord(41.3874, 2.1686));
        assert_eq!((d * 10.0).round() / 10.0, d);
        // Madrid to Barcelona
        assert!((d - 505.0).abs() < 2.0, "got {}", d);
    }

    #[test]
    fn agrees_with_independent_haversine_implementation() {
        let pairs = [
            ((40.0, -3.0), (40.01, -3.0)),
            ((40.4168, -3.7038), (41.3874, 2.1686)),
            ((43.2630, -2.9350), (36.7213, -4.4214)),
            ((51.5074, -0.1278), (-33.8688, 151.2093)),
        ];
        for ((lat1, lon1), (lat2, lon2)) in pairs {
            let ours = distance_km(coord(lat1, lon1), coord(lat2, lon2));
            let reference = distance(
                Location {
                    latitude: lat1,
                    longitude: lon1,
                },
                Location {
                    latitude: lat2,
                    longitude: lon2,
                },
                Units::Kilometers,
            );
            assert!(
                (ours - reference).abs() <= 0.051,
                "ours {} vs reference {}",
                ours,
                reference
            );
        }
    }
}
