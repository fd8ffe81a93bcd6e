mod distance;
mod error;
mod gasofa;
mod prices;
mod stations;
mod types;
mod utils;

#[cfg(test)]
mod test_support;

pub use distance::{distance_km, EARTH_RADIUS_KM};
pub use error::{GasofaError, InvalidArgumentError};
pub use gasofa::*;

pub use prices::archive_fetcher::ArchiveFetcher;
pub use prices::error::{CacheError, ExtractionError, FetchError};
pub use prices::file_name::{archive_file_name, cache_file_name};

pub use stations::error::ParseRowError;
pub use stations::locate_station::StationLocator;
pub use stations::record_parser::{parse_row, MIN_COMPOSITE_LEN};

pub use types::config::{
    CacheRetention, GasofaConfig, DEFAULT_FETCH_TIMEOUT, DEFAULT_REMOTE_BASE_URL,
};
pub use types::coordinate::Coordinate;
pub use types::fuel_type::FuelType;
pub use types::station::StationRecord;
