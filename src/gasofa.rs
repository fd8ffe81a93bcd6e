//! This module provides the main entry point for searching fuel stations.
//! It ties together the configuration, the daily price cache and the
//! distance filter behind a single builder-style call.

use crate::error::GasofaError;
use crate::stations::locate_station::StationLocator;
use crate::types::config::GasofaConfig;
use crate::types::coordinate::Coordinate;
use crate::types::fuel_type::FuelType;
use crate::types::station::StationRecord;
use crate::utils::ensure_cache_dir_exists;
use bon::bon;

/// Search radius used when the caller does not specify one, in kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// The main client for finding fuel stations and their prices.
///
/// Each search uses the price file published for the current day. The file is
/// downloaded once per fuel type and day into the configured cache directory and
/// reused for every later search on that day.
///
/// Create an instance using [`Gasofa::new()`] for default behavior (using a
/// standard cache directory) or [`Gasofa::with_config()`] for full control.
///
/// # Examples
///
/// ```no_run
/// # use gasofa::Gasofa;
/// # use gasofa::GasofaError;
/// # async fn run() -> Result<(), GasofaError> {
/// let client = Gasofa::new().await?;
/// // Now you can use the client to find stations
/// # Ok(())
/// # }
/// ```
pub struct Gasofa {
    locator: StationLocator,
}

#[bon]
impl Gasofa {
    /// Creates a new `Gasofa` client from an explicit configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache directory, remote base URL, fetch timeout and cache retention.
    ///              The cache directory will be created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`GasofaError::CacheDirCreation`] if the cache directory cannot be created,
    /// or [`GasofaError::HttpClient`] if the HTTP client cannot be built.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use gasofa::{Gasofa, GasofaConfig, GasofaError};
    /// # use std::time::Duration;
    /// # async fn run() -> Result<(), GasofaError> {
    /// let config = GasofaConfig::builder()
    ///     .cache_dir("/var/cache/gasofa".into())
    ///     .fetch_timeout(Duration::from_secs(15))
    ///     .build();
    /// let client = Gasofa::with_config(config).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn with_config(config: GasofaConfig) -> Result<Self, GasofaError> {
        ensure_cache_dir_exists(&config.cache_dir)
            .await
            .map_err(|e| GasofaError::CacheDirCreation(config.cache_dir.clone(), e))?;
        Ok(Self {
            locator: StationLocator::new(&config)?,
        })
    }

    /// Creates a new `Gasofa` client using the default configuration.
    ///
    /// The cache directory is determined using the `dirs` crate, typically
    /// `~/.cache/gasofa_cache` on Linux.
    ///
    /// # Errors
    ///
    /// Returns [`GasofaError::CacheDirResolution`] if the default cache directory cannot be found,
    /// plus everything [`Gasofa::with_config`] can return.
    pub async fn new() -> Result<Self, GasofaError> {
        Self::with_config(GasofaConfig::from_default_cache_dir()?).await
    }

    /// The underlying locator, for callers that already hold typed inputs.
    pub fn locator(&self) -> &StationLocator {
        &self.locator
    }

    /// Finds fuel stations near a position, with today's price for one fuel type.
    ///
    /// Stations strictly closer than the radius are returned in the order they
    /// appear in the published file, each annotated with its distance. Rows of the
    /// file that cannot be parsed are skipped.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.latitude(f64)`: **Required.** Latitude of the search position in degrees.
    /// * `.longitude(f64)`: **Required.** Longitude of the search position in degrees.
    /// * `.fuel_type(&str)`: **Required.** One of `G95`, `G98`, `GOA`, `NGO`.
    /// * `.radius_km(f64)`: Optional. Search radius in kilometres. Defaults to `5.0`.
    ///
    /// # Returns
    ///
    /// A `Vec<StationRecord>`, empty when nothing lies within the radius.
    ///
    /// # Errors
    ///
    /// Returns [`GasofaError::InvalidArgument`] for an unknown fuel type, an
    /// out-of-range position or a negative radius, before touching the cache.
    /// Returns [`GasofaError::DataUnavailable`] if today's file is not cached and
    /// cannot be downloaded or extracted.
    /// Returns [`GasofaError::CacheRead`] if the cached file cannot be read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use gasofa::{Gasofa, GasofaError};
    /// #
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), GasofaError> {
    /// let client = Gasofa::new().await?;
    ///
    /// // Diesel within the default 5 km of Puerta del Sol
    /// let stations = client
    ///     .find_stations()
    ///     .latitude(40.4168)
    ///     .longitude(-3.7038)
    ///     .fuel_type("GOA")
    ///     .call()
    ///     .await?;
    ///
    /// for station in &stations {
    ///     println!(
    ///         "{:>5.1} km  {:?}  {}",
    ///         station.distance_km(),
    ///         station.price(),
    ///         station.description()
    ///     );
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn find_stations(
        &self,
        latitude: f64,
        longitude: f64,
        fuel_type: &str,
        radius_km: Option<f64>,
    ) -> Result<Vec<StationRecord>, GasofaError> {
        let fuel_type: FuelType = fuel_type.parse()?;
        let position = Coordinate::new(latitude, longitude)?;
        let radius_km = radius_km.unwrap_or(DEFAULT_RADIUS_KM);

        self.locator.find(position, fuel_type, radius_km).await
    }
}
