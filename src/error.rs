use crate::prices::error::CacheError;
use crate::types::fuel_type::FuelType;
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Rejected caller input. Raised before any file or network access.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidArgumentError {
    #[error("Unknown fuel type '{0}', expected one of G95, G98, GOA, NGO")]
    UnknownFuelType(String),

    #[error("Coordinate ({latitude}, {longitude}) is outside latitude [-90, 90] / longitude [-180, 180]")]
    CoordinateOutOfRange { latitude: f64, longitude: f64 },

    #[error("Search radius must be a finite, non-negative number of kilometres, got {0}")]
    InvalidRadius(f64),
}

#[derive(Debug, Error)]
pub enum GasofaError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),

    #[error("No {fuel_type} price data available for {date}")]
    DataUnavailable {
        fuel_type: FuelType,
        date: NaiveDate,
        #[source]
        source: CacheError,
    },

    #[error("Failed to read cache file '{0}'")]
    CacheRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine cache directory")]
    CacheDirResolution,

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
