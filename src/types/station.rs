//! Defines the record returned for every fuel station matched by a search.

use crate::types::coordinate::Coordinate;
use serde::Serialize;

/// A single fuel station read from the daily price file.
///
/// Records are produced by [`parse_row`](crate::parse_row) with a distance of
/// `0.0` and annotated with the distance to the search position by the
/// [`StationLocator`](crate::StationLocator). Serializes as
/// `{ latitude, longitude, distanceKm, price, description }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    #[serde(flatten)]
    position: Coordinate,
    distance_km: f64,
    price: Option<f64>,
    description: String,
}

impl StationRecord {
    pub(crate) fn new(position: Coordinate, price: Option<f64>, description: String) -> Self {
        Self {
            position,
            distance_km: 0.0,
            price,
            description,
        }
    }

    /// Returns the same station annotated with its distance from the search position.
    pub(crate) fn at_distance(self, distance_km: f64) -> Self {
        Self {
            distance_km,
            ..self
        }
    }

    /// Location of the station.
    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn latitude(&self) -> f64 {
        self.position.latitude()
    }

    pub fn longitude(&self) -> f64 {
        self.position.longitude()
    }

    /// Great-circle distance in kilometres from the search position, rounded to 0.1 km.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Price per litre for the requested fuel, or `None` if the file held no readable price.
    pub fn price(&self) -> Option<f64> {
        self.price
    }

    /// Brand, address and opening hours as published, trimmed.
    pub fn description(&self) -> &str {
        &self.description
    }
}
