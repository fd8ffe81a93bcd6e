use crate::distance::distance_km;
use crate::error::{GasofaError, InvalidArgumentError};
use crate::prices::archive_fetcher::ArchiveFetcher;
use crate::stations::record_parser::{decode_field, parse_row};
use crate::types::config::GasofaConfig;
use crate::types::coordinate::Coordinate;
use crate::types::fuel_type::FuelType;
use crate::types::station::StationRecord;
use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Finds the stations of a daily price file that lie within a radius of a position.
pub struct StationLocator {
    fetcher: ArchiveFetcher,
}

impl StationLocator {
    pub fn new(config: &GasofaConfig) -> Result<Self, GasofaError> {
        let fetcher = ArchiveFetcher::new(config).map_err(GasofaError::HttpClient)?;
        Ok(StationLocator { fetcher })
    }

    pub fn cache_dir(&self) -> &Path {
        self.fetcher.cache_dir()
    }

    /// Stations strictly closer than `radius_km` to `position`, in file order,
    /// using today's (local date) price file for `fuel_type`.
    pub async fn find(
        &self,
        position: Coordinate,
        fuel_type: FuelType,
        radius_km: f64,
    ) -> Result<Vec<StationRecord>, GasofaError> {
        self.find_on(position, fuel_type, radius_km, Local::now().date_naive())
            .await
    }

    pub(crate) async fn find_on(
        &self,
        position: Coordinate,
        fuel_type: FuelType,
        radius_km: f64,
        date: NaiveDate,
    ) -> Result<Vec<StationRecord>, GasofaError> {
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(InvalidArgumentError::InvalidRadius(radius_km).into());
        }

        let csv_path = self
            .fetcher
            .ensure_local(fuel_type, date)
            .await
            .map_err(|source| GasofaError::DataUnavailable {
                fuel_type,
                date,
                source,
            })?;

        tokio::task::spawn_blocking(move || Self::scan_file(&csv_path, position, radius_km))
            .await?
    }

    fn scan_file(
        path: &Path,
        position: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<StationRecord>, GasofaError> {
        let file =
            File::open(path).map_err(|e| GasofaError::CacheRead(path.to_path_buf(), e))?;
        Self::scan(file, path, position, radius_km)
    }

    /// Streams headerless csv rows, skipping (and logging) every row that
    /// does not parse. Only an I/O failure aborts the scan.
    fn scan<R: Read>(
        reader: R,
        path: &Path,
        position: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<StationRecord>, GasofaError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut stations = Vec::new();
        let mut rows = 0usize;
        let mut skipped = 0usize;
        let mut record = csv::ByteRecord::new();

        loop {
            match csv_reader.read_byte_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    let line = e.position().map(|p| p.line());
                    match e.into_kind() {
                        csv::ErrorKind::Io(io_err) => {
                            return Err(GasofaError::CacheRead(PathBuf::from(path), io_err))
                        }
                        other => {
                            rows += 1;
                            skipped += 1;
                            warn!("Skipping unreadable row at line {:?}: {:?}", line, other);
                            continue;
                        }
                    }
                }
            }
            rows += 1;

            let fields: Vec<_> = record.iter().map(decode_field).collect();
            let station = match parse_row(fields.as_slice()) {
                Ok(station) => station,
                Err(e) => {
                    skipped += 1;
                    debug!("Skipping row {} of {:?}: {}", rows, path, e);
                    continue;
                }
            };

            let distance = distance_km(position, station.position());
            if distance < radius_km {
                stations.push(station.at_distance(distance));
            }
        }

        if skipped > 0 {
            warn!("Skipped {} of {} rows in {:?}", skipped, rows, path);
        }
        info!(
            "Found {} stations within {} km among {} rows of {:?}",
            stations.len(),
            radius_km,
            rows,
            path
        );
        Ok(stations)
    }
}
