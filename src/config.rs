use crate::error::{PrebinError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const MANIFEST_FILE_NAME: &str = "prebin.toml";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Manifest describing the one package this invocation manages.
///
/// Loaded once at startup and passed into each component; nothing reads it
/// from ambient state.
#[derive(Debug, Clone, Deserialize)]
pub struct PrebinConfig {
    pub package: PackageConfig,

    #[serde(default)]
    pub download: DownloadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackageConfig {
    pub name: String,
    pub version: String,
    pub repository: String,

    /// Expected SHA-256 of the release archive. Downloads are trusted when
    /// absent.
    #[serde(default)]
    pub sha256: Option<String>,

    /// Name of the binary inside the archive, defaults to the package name.
    #[serde(default)]
    pub binary: Option<String>,
}

impl PackageConfig {
    pub fn binary_name(&self) -> &str {
        self.binary.as_deref().unwrap_or(&self.name)
    }

    /// File name of the binary on the current platform.
    pub fn binary_file_name(&self) -> String {
        if cfg!(windows) {
            format!("{}.exe", self.binary_name())
        } else {
            self.binary_name().to_string()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl PrebinConfig {
    pub fn load(manifest_path: &Path) -> Result<Self> {
        if !manifest_path.exists() {
            return Err(PrebinError::ConfigFile(format!(
                "Manifest not found at {}",
                manifest_path.display()
            )));
        }

        let contents = fs::read_to_string(manifest_path)?;
        let config: PrebinConfig = toml::from_str(&contents).map_err(|e| {
            PrebinError::ConfigFile(format!(
                "Failed to parse {}: {e}",
                manifest_path.display()
            ))
        })?;

        config.validate()?;
        log::debug!("Loaded manifest from {}", manifest_path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.package.name.trim().is_empty() {
            return Err(PrebinError::InvalidConfig(
                "package.name must not be empty".to_string(),
            ));
        }

        if self.package.version.trim().is_empty() {
            return Err(PrebinError::InvalidConfig(
                "package.version must not be empty".to_string(),
            ));
        }

        if !self.package.repository.starts_with("https://") {
            return Err(PrebinError::InvalidConfig(format!(
                "package.repository must be an https:// URL, got '{}'",
                self.package.repository
            )));
        }

        if let Some(sha256) = &self.package.sha256 {
            let valid = sha256.len() == 64 && sha256.chars().all(|c| c.is_ascii_hexdigit());
            if !valid {
                return Err(PrebinError::InvalidConfig(
                    "package.sha256 must be a 64-character hex digest".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, contents: &str) -> std::path::PathBuf {
        let path = dir.join(MANIFEST_FILE_NAME);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn load_minimal_manifest() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(
            temp.path(),
            r#"
[package]
name = "foo"
version = "1.2.3"
repository = "https://github.com/acme/foo"
"#,
        );

        let config = PrebinConfig::load(&path).unwrap();
        assert_eq!(config.package.name, "foo");
        assert_eq!(config.package.version, "1.2.3");
        assert_eq!(config.package.binary_name(), "foo");
        assert_eq!(config.package.sha256, None);
        assert_eq!(config.download.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn load_full_manifest() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(
            temp.path(),
            r#"
[package]
name = "foo"
version = "1.2.3"
repository = "https://github.com/acme/foo"
sha256 = "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
binary = "foo-cli"

[download]
timeout_secs = 30
"#,
        );

        let config = PrebinConfig::load(&path).unwrap();
        assert_eq!(config.package.binary_name(), "foo-cli");
        assert!(config.package.sha256.is_some());
        assert_eq!(config.download.timeout_secs, 30);
    }

    #[test]
    fn missing_manifest_is_a_config_file_error() {
        let temp = TempDir::new().unwrap();
        let result = PrebinConfig::load(&temp.path().join("absent.toml"));
        assert!(matches!(result, Err(PrebinError::ConfigFile(_))));
    }

    #[test]
    fn empty_version_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(
            temp.path(),
            r#"
[package]
name = "foo"
version = " "
repository = "https://github.com/acme/foo"
"#,
        );

        let result = PrebinConfig::load(&path);
        assert!(matches!(result, Err(PrebinError::InvalidConfig(_))));
    }

    #[test]
    fn http_repository_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(
            temp.path(),
            r#"
[package]
name = "foo"
version = "1.2.3"
repository = "http://github.com/acme/foo"
"#,
        );

        let result = PrebinConfig::load(&path);
        assert!(matches!(result, Err(PrebinError::InvalidConfig(_))));
    }

    #[test]
    fn malformed_sha256_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(
            temp.path(),
            r#"
[package]
name = "foo"
version = "1.2.3"
repository = "https://github.com/acme/foo"
sha256 = "nothex"
"#,
        );

        let result = PrebinConfig::load(&path);
        assert!(matches!(result, Err(PrebinError::InvalidConfig(_))));
    }

    #[test]
    #[cfg(windows)]
    fn binary_file_name_appends_exe_on_windows() {
        let config = PackageConfig {
            name: "foo".to_string(),
            version: "1.0.0".to_string(),
            repository: "https://github.com/acme/foo".to_string(),
            sha256: None,
            binary: None,
        };
        assert_eq!(config.binary_file_name(), "foo.exe");
    }
}
