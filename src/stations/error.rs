use thiserror::Error;

/// Why a single row of the price file could not be turned into a station.
///
/// Rows failing with one of these are skipped; the rest of the file is still read.
#[derive(Debug, Error, PartialEq)]
pub enum ParseRowError {
    #[error("Row has {found} fields, expected at least 3")]
    TooFewFields { found: usize },

    #[error("Invalid {field} '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Station coordinate ({latitude}, {longitude}) is out of range")]
    CoordinateOutOfRange { latitude: f64, longitude: f64 },

    #[error("Description/price field has {length} characters, expected at least {minimum}")]
    FieldTooShort { length: usize, minimum: usize },
}
