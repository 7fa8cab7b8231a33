use std::time::Duration;

/// Default timeout for download operations
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Maximum allowed download size (1GB)
pub const MAX_DOWNLOAD_SIZE: u64 = 1_073_741_824;

/// Options for configuring download behavior
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Expected checksum of the downloaded file (SHA256)
    pub checksum: Option<String>,

    /// Timeout for the download operation
    pub timeout: Duration,

    /// Maximum allowed file size
    pub max_size: u64,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            checksum: None,
            timeout: DEFAULT_TIMEOUT,
            max_size: MAX_DOWNLOAD_SIZE,
        }
    }
}
