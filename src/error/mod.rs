mod context;
mod exit_codes;
mod format;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::format_error_chain;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrebinError {
    #[error("Unsupported platform: {os} {arch}")]
    UnsupportedPlatform { os: String, arch: String },

    #[error("Failed to download {url}")]
    Download { url: String, status: Option<u16> },

    #[error("Checksum verification failed")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Failed to extract archive: {0}")]
    Extract(String),

    #[error("'{package}' {version} is not installed")]
    NotInstalled { package: String, version: String },

    #[error("Failed to acquire {scope} lock")]
    LockingAcquire { scope: String, details: String },

    #[error("Timed out waiting for {scope} lock after {waited_secs:.1}s")]
    LockingTimeout {
        scope: String,
        waited_secs: f64,
        details: String,
    },

    #[error("Failed to release {scope} lock")]
    LockingRelease { scope: String, details: String },

    #[error("Manifest file error: {0}")]
    ConfigFile(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Security error: {0}")]
    SecurityError(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("System error: {0}")]
    SystemError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] attohttpc::Error),
}

pub type Result<T> = std::result::Result<T, PrebinError>;
