use crate::prices::error::{CacheError, ExtractionError, FetchError};
use crate::prices::file_name::{
    archive_file_name, cache_file_name, is_partial_file, is_stale_cache_file, TABULAR_EXTENSION,
    TEMP_PREFIX,
};
use crate::types::config::{CacheRetention, GasofaConfig};
use crate::types::fuel_type::FuelType;
use chrono::NaiveDate;
use futures_util::TryStreamExt;
use log::{debug, info, warn};
use reqwest::Client;
use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tokio::{fs, task};
use tokio_util::io::StreamReader;
use zip::result::ZipError;
use zip::ZipArchive;

const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Keeps one extracted price file per fuel type and day in the cache directory,
/// downloading the published archive only when that file is missing.
pub struct ArchiveFetcher {
    cache_dir: PathBuf,
    remote_base_url: String,
    retention: CacheRetention,
    fetch_timeout: Duration,
    download_client: Client,
}

impl ArchiveFetcher {
    pub fn new(config: &GasofaConfig) -> Result<Self, reqwest::Error> {
        let download_client = Client::builder()
            .timeout(config.fetch_timeout)
            .connect_timeout(config.fetch_timeout.min(MAX_CONNECT_TIMEOUT))
            .user_agent(concat!("gasofa/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(ArchiveFetcher {
            cache_dir: config.cache_dir.clone(),
            remote_base_url: config.remote_base_url.clone(),
            retention: config.retention,
            fetch_timeout: config.fetch_timeout,
            download_client,
        })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path of the price file for `fuel_type` on `date`, downloading
    /// and extracting the archive first if it is not cached yet.
    ///
    /// The file only ever appears under its final name once fully extracted, so
    /// an existing file is trusted without further checks.
    pub async fn ensure_local(
        &self,
        fuel_type: FuelType,
        date: NaiveDate,
    ) -> Result<PathBuf, CacheError> {
        let file_name = cache_file_name(fuel_type, date);
        let csv_path = self.cache_dir.join(&file_name);

        if Self::is_cached(&csv_path).await {
            info!(
                "Cache hit for {} prices on {} at {:?}",
                fuel_type, date, csv_path
            );
            return Ok(csv_path);
        }
        warn!(
            "Cache miss for {} prices on {}. Downloading and extracting.",
            fuel_type, date
        );

        fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| CacheError::CacheDirCreation(self.cache_dir.clone(), e))?;

        let archive = self.download(&archive_file_name(fuel_type, date)).await?;

        let cache_dir = self.cache_dir.clone();
        let target = csv_path.clone();
        task::spawn_blocking(move || {
            Self::extract_into_cache(archive, &file_name, &cache_dir, &target)
        })
        .await??;
        info!("Cached {} prices for {} at {:?}", fuel_type, date, csv_path);

        if self.retention == CacheRetention::CurrentDayOnly {
            self.evict_stale(fuel_type, date).await;
        }

        Ok(csv_path)
    }

    async fn is_cached(path: &Path) -> bool {
        match fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() && metadata.len() > 0 => true,
            Ok(_) => {
                warn!("Ignoring unusable cache entry at {:?}", path);
                false
            }
            Err(_) => false,
        }
    }

    fn archive_url(&self, archive_name: &str) -> String {
        format!(
            "{}/{}",
            self.remote_base_url.trim_end_matches('/'),
            archive_name
        )
    }

    fn temp_file(dir: &Path, suffix: &str) -> Result<NamedTempFile, CacheError> {
        tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(suffix)
            .tempfile_in(dir)
            .map_err(|e| CacheError::TempFile(dir.to_path_buf(), e))
    }

    /// Streams the archive into a temporary file inside the cache directory.
    /// The file is deleted when the returned handle is dropped.
    async fn download(&self, archive_name: &str) -> Result<NamedTempFile, CacheError> {
        let url = self.archive_url(archive_name);
        info!("Downloading price archive from {}", url);

        let response = self
            .download_client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                let err = if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    FetchError::NetworkRequest(url, e)
                };
                return Err(err.into());
            }
        };

        let archive = Self::temp_file(&self.cache_dir, ".zip.part")?;
        let handle = archive
            .as_file()
            .try_clone()
            .map_err(|e| CacheError::TempFile(self.cache_dir.clone(), e))?;
        let mut file = fs::File::from_std(handle);

        let stream = response
            .bytes_stream()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e));
        let mut stream_reader = StreamReader::new(stream);
        let written = tokio::io::copy(&mut stream_reader, &mut file)
            .await
            .map_err(|e| FetchError::DownloadIo(url.clone(), e))?;
        file.flush()
            .await
            .map_err(|e| FetchError::DownloadIo(url.clone(), e))?;

        if written == 0 {
            return Err(FetchError::EmptyResponse(url).into());
        }
        info!("Downloaded {} bytes from {}", written, url);
        Ok(archive)
    }

    /// Extracts the price file from `archive` and renames it onto `target`.
    /// Runs on a blocking thread; the archive is removed when it goes out of scope.
    fn extract_into_cache(
        archive: NamedTempFile,
        expected_name: &str,
        cache_dir: &Path,
        target: &Path,
    ) -> Result<(), CacheError> {
        let archive_path = archive.path().to_path_buf();
        let reader = File::open(&archive_path)
            .map_err(|e| ExtractionError::ExtractIo(archive_path.clone(), e))?;
        let mut zip = ZipArchive::new(reader)
            .map_err(|e| ExtractionError::InvalidArchive(archive_path.clone(), e))?;

        let index = Self::find_tabular_entry(&mut zip, expected_name)
            .map_err(|e| ExtractionError::InvalidArchive(archive_path.clone(), e))?
            .ok_or_else(|| ExtractionError::MissingTabularFile {
                archive: archive_path.clone(),
                expected: expected_name.to_string(),
            })?;
        let mut entry = zip
            .by_index(index)
            .map_err(|e| ExtractionError::InvalidArchive(archive_path.clone(), e))?;
        let entry_name = entry.name().to_string();

        let mut extracted = Self::temp_file(cache_dir, ".csv.part")?;
        let written = io::copy(&mut entry, extracted.as_file_mut())
            .map_err(|e| ExtractionError::ExtractIo(archive_path.clone(), e))?;
        if written == 0 {
            return Err(ExtractionError::EmptyTabularFile(entry_name).into());
        }
        extracted
            .as_file()
            .sync_all()
            .map_err(|e| CacheError::TempFile(cache_dir.to_path_buf(), e))?;

        extracted
            .persist(target)
            .map_err(|e| CacheError::Persist(target.to_path_buf(), e.error))?;
        debug!("Extracted {} ({} bytes) to {:?}", entry_name, written, target);
        Ok(())
    }

    /// Index of the entry named `expected_name`, else of the first csv file in the archive.
    fn find_tabular_entry<R: Read + Seek>(
        zip: &mut ZipArchive<R>,
        expected_name: &str,
    ) -> Result<Option<usize>, ZipError> {
        let mut fallback = None;
        for index in 0..zip.len() {
            let entry = zip.by_index(index)?;
            if !entry.is_file() {
                continue;
            }
            let name = entry.name();
            let base_name = name.rsplit('/').next().unwrap_or(name);
            if base_name == expected_name {
                return Ok(Some(index));
            }
            let is_csv = Path::new(base_name)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(TABULAR_EXTENSION));
            if is_csv && fallback.is_none() {
                fallback = Some(index);
            }
        }
        if let Some(index) = fallback {
            warn!(
                "Archive has no {}, falling back to entry #{}",
                expected_name, index
            );
        }
        Ok(fallback)
    }

    /// Deletes earlier days' files for `fuel_type`, and partial files that have
    /// not been written to for longer than the fetch timeout. Failures are
    /// logged and ignored.
    async fn evict_stale(&self, fuel_type: FuelType, date: NaiveDate) {
        let mut entries = match fs::read_dir(&self.cache_dir).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Could not list {:?} for stale price files: {}",
                    self.cache_dir, e
                );
                return;
            }
        };
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!("Stopped scanning {:?} for stale files: {}", self.cache_dir, e);
                    break;
                }
            };
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let evict = if is_partial_file(name) {
                self.is_abandoned(&entry).await
            } else {
                is_stale_cache_file(name, fuel_type, date)
            };
            if !evict {
                continue;
            }
            match fs::remove_file(entry.path()).await {
                Ok(()) => info!("Evicted stale price file {:?}", entry.path()),
                Err(e) => warn!("Failed to evict stale price file {:?}: {}", entry.path(), e),
            }
        }
    }

    /// A partial file nobody has touched within the fetch timeout belongs to
    /// a download or extraction that died.
    async fn is_abandoned(&self, entry: &fs::DirEntry) -> bool {
        match entry.metadata().await.and_then(|m| m.modified()) {
            Ok(modified) => modified
                .elapsed()
                .is_ok_and(|age| age > self.fetch_timeout),
            Err(e) => {
                debug!("No modification time for {:?}: {}", entry.path(), e);
                false
            }
        }
    }
}
