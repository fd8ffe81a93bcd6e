use std::path::PathBuf;
use thiserror::Error;

/// The remote archive could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    // Covers stream errors and timeouts while the body is being written out
    #[error("Download of {0} was interrupted")]
    DownloadIo(String, #[source] std::io::Error),

    #[error("Server returned no data for {0}")]
    EmptyResponse(String),
}

/// The downloaded bytes did not yield a usable price file.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("'{0}' is not a valid zip archive")]
    InvalidArchive(PathBuf, #[source] zip::result::ZipError),

    #[error("Archive '{archive}' contains no '{expected}' or any other csv file")]
    MissingTabularFile { archive: PathBuf, expected: String },

    #[error("Price file '{0}' in the archive is empty")]
    EmptyTabularFile(String),

    #[error("Failed to extract '{0}'")]
    ExtractIo(PathBuf, #[source] std::io::Error),
}

/// Failure to populate the local cache for one fuel type and day.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to write temporary file in '{0}'")]
    TempFile(PathBuf, #[source] std::io::Error),

    #[error("Failed to move extracted file into place at '{0}'")]
    Persist(PathBuf, #[source] std::io::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
