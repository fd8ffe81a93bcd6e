pub mod archive_fetcher;
pub mod error;
pub mod file_name;
