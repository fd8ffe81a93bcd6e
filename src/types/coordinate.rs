//! Geographical coordinates used both for the caller's position and for station locations.

use crate::error::InvalidArgumentError;
use serde::Serialize;

/// A validated latitude/longitude pair in decimal degrees.
///
/// Latitude must lie in `[-90, 90]` and longitude in `[-180, 180]`. Values are
/// checked once in [`Coordinate::new`]; after that the pair is immutable.
///
/// # Examples
///
/// ```
/// use gasofa::Coordinate;
///
/// let madrid = Coordinate::new(40.4168, -3.7038).unwrap();
/// assert_eq!(madrid.latitude(), 40.4168);
/// assert_eq!(madrid.longitude(), -3.7038);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidArgumentError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidArgumentError::CoordinateOutOfRange {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}
