/// Release-archive download for prebin
///
/// This module fetches prebuilt release archives with:
/// - Streaming writes through a temp file and an atomic rename
/// - Optional SHA-256 verification
/// - Bounded retries with exponential backoff for transient network failures
/// - Progress reporting and a local archive cache
mod checksum;
mod client;
mod http_file_downloader;
mod options;
mod progress;

// Re-export public types and traits
pub use checksum::{calculate_sha256, verify_checksum};
pub use client::{HttpClient, HttpResponse};
pub use http_file_downloader::{HttpFileDownloader, ProgressReporter};
pub use options::{DEFAULT_TIMEOUT, DownloadOptions, MAX_DOWNLOAD_SIZE};
pub use progress::{IndicatifProgressReporter, SilentProgressReporter};

use crate::config::PrebinConfig;
use crate::error::{PrebinError, Result};
use crate::paths;
use crate::release::ReleaseAsset;
use retry::{OperationResult, delay::Exponential, retry_with_index};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const MAX_FETCH_ATTEMPTS: usize = 3;
const INITIAL_BACKOFF_MS: u64 = 500;

/// Fetch a release archive into the local cache and return the cached path.
///
/// Connection-level failures are retried with exponential backoff; an HTTP
/// error status is final. A cached archive short-circuits the fetch entirely.
pub fn fetch_release_archive(
    config: &PrebinConfig,
    asset: &ReleaseAsset,
    prebin_home: &Path,
    no_progress: bool,
    timeout_secs: Option<u64>,
) -> Result<PathBuf> {
    crate::security::verify_https_security(&asset.url)?;

    let cache_dir = paths::cache::ensure_cache_root(prebin_home)?;
    let cache_path = cache_dir.join(&asset.archive_file_name);
    let checksum = config.package.sha256.clone();

    // Cache writes are atomic, so anything at the cache path is a complete
    // archive. With a configured checksum it still has to validate.
    if cache_path.exists() {
        match &checksum {
            Some(expected) => match verify_checksum(&cache_path, expected) {
                Ok(()) => {
                    log::info!("Using cached archive at {}", cache_path.display());
                    return Ok(cache_path);
                }
                Err(err) => {
                    log::warn!("Cached archive failed verification, refetching: {err}");
                    fs::remove_file(&cache_path)?;
                }
            },
            None => {
                log::info!("Using cached archive at {}", cache_path.display());
                return Ok(cache_path);
            }
        }
    }

    let timeout = timeout_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(config.download.timeout_secs));

    let options = DownloadOptions {
        checksum,
        timeout,
        max_size: MAX_DOWNLOAD_SIZE,
    };

    let result = retry_with_index(
        Exponential::from_millis(INITIAL_BACKOFF_MS).take(MAX_FETCH_ATTEMPTS - 1),
        |current_try| {
            let reporter: Box<dyn ProgressReporter> = if no_progress {
                Box::new(SilentProgressReporter)
            } else {
                Box::new(IndicatifProgressReporter::new(&asset.slug))
            };
            let mut downloader = HttpFileDownloader::new().with_progress_reporter(reporter);
            downloader.http_client.set_timeout(options.timeout);

            match downloader.download(&asset.url, &cache_path, &options) {
                Ok(path) => OperationResult::Ok(path),
                Err(err @ (PrebinError::Http(_) | PrebinError::Io(_))) => {
                    log::warn!("Transient fetch failure (attempt {current_try}): {err}");
                    OperationResult::Retry(err)
                }
                Err(err) => OperationResult::Err(err),
            }
        },
    );

    result.map_err(|e| match e.error {
        // Retry budget exhausted on a transient failure
        err @ (PrebinError::Http(_) | PrebinError::Io(_)) => {
            log::debug!("Giving up on {} after retries: {err}", asset.url);
            PrebinError::Download {
                url: asset.url.clone(),
                status: None,
            }
        }
        other => other,
    })
}
