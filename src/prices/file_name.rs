//! Naming of the daily price files, locally and on the publisher's server.

use crate::types::fuel_type::FuelType;
use chrono::NaiveDate;

const FILE_PREFIX: &str = "eess_";
/// Prefix of in-progress downloads and extractions in the cache directory.
pub(crate) const TEMP_PREFIX: &str = ".eess_";
const TEMP_SUFFIX: &str = ".part";
pub(crate) const TABULAR_EXTENSION: &str = "csv";
const ARCHIVE_EXTENSION: &str = "zip";

fn base_name(fuel_type: FuelType, date: NaiveDate) -> String {
    format!("{}{}_{}", FILE_PREFIX, fuel_type.code(), date.format("%d%m%Y"))
}

/// Name of the extracted price file for a fuel type and day, e.g. `eess_G95_05032024.csv`.
///
/// ```
/// use chrono::NaiveDate;
/// use gasofa::{cache_file_name, FuelType};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert_eq!(cache_file_name(FuelType::Gasoline95, date), "eess_G95_05032024.csv");
/// ```
pub fn cache_file_name(fuel_type: FuelType, date: NaiveDate) -> String {
    format!("{}.{}", base_name(fuel_type, date), TABULAR_EXTENSION)
}

/// Name of the published archive holding [`cache_file_name`], e.g. `eess_G95_05032024.zip`.
pub fn archive_file_name(fuel_type: FuelType, date: NaiveDate) -> String {
    format!("{}.{}", base_name(fuel_type, date), ARCHIVE_EXTENSION)
}

/// True for cache files of `fuel_type` that belong to a day before `date`.
pub(crate) fn is_stale_cache_file(file_name: &str, fuel_type: FuelType, date: NaiveDate) -> bool {
    let prefix = format!("{}{}_", FILE_PREFIX, fuel_type.code());
    let suffix = format!(".{}", TABULAR_EXTENSION);
    let Some(stamp) = file_name
        .strip_prefix(&prefix)
        .and_then(|rest| rest.strip_suffix(&suffix))
    else {
        return false;
    };
    if stamp.len() != 8 || !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    NaiveDate::parse_from_str(stamp, "%d%m%Y").is_ok_and(|day| day < date)
}

/// True for temporary files left by a download or extraction.
pub(crate) fn is_partial_file(file_name: &str) -> bool {
    file_name.starts_with(TEMP_PREFIX) && file_name.ends_with(TEMP_SUFFIX)
}
