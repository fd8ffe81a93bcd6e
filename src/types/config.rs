//! Runtime configuration for the station search and its local price cache.

use crate::error::GasofaError;
use crate::utils::get_cache_dir;
use bon::Builder;
use std::path::PathBuf;
use std::time::Duration;

/// Base URL under which the daily `eess_<CODE>_<DDMMYYYY>.zip` archives are published.
pub const DEFAULT_REMOTE_BASE_URL: &str = "http://geoportal.mityc.es/hidrocarburos/files/";

/// Default limit for a whole archive download.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// What happens to price files from earlier days once today's file is cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheRetention {
    /// After a successful download, delete earlier-dated files of the same fuel type
    /// and partial downloads abandoned for longer than the fetch timeout.
    #[default]
    CurrentDayOnly,
    /// Never delete anything from the cache directory.
    KeepAll,
}

/// Configuration passed to [`Gasofa::with_config`](crate::Gasofa::with_config).
///
/// # Examples
///
/// ```
/// use gasofa::{CacheRetention, GasofaConfig};
/// use std::time::Duration;
///
/// let config = GasofaConfig::builder()
///     .cache_dir("/tmp/gasofa".into())
///     .fetch_timeout(Duration::from_secs(10))
///     .retention(CacheRetention::KeepAll)
///     .build();
/// assert_eq!(config.remote_base_url, gasofa::DEFAULT_REMOTE_BASE_URL);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct GasofaConfig {
    /// Directory holding the extracted daily price files. Created if missing.
    pub cache_dir: PathBuf,
    /// URL prefix the archive file name is appended to.
    #[builder(into, default = DEFAULT_REMOTE_BASE_URL.to_string())]
    pub remote_base_url: String,
    /// Total time allowed for one archive download.
    #[builder(default = DEFAULT_FETCH_TIMEOUT)]
    pub fetch_timeout: Duration,
    #[builder(default)]
    pub retention: CacheRetention,
}

impl GasofaConfig {
    /// Configuration rooted in the user's cache directory (e.g. `~/.cache/gasofa_cache`).
    pub fn from_default_cache_dir() -> Result<Self, GasofaError> {
        Ok(Self::builder().cache_dir(get_cache_dir()?).build())
    }
}
