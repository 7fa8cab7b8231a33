use crate::error::{PrebinError, Result};
use crate::paths;
use crate::platform::file_ops;
use crate::release::ReleaseAsset;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk view of installed binaries and cached archives under the prebin
/// home directory.
pub struct InstallRepository {
    prebin_home: PathBuf,
}

impl InstallRepository {
    pub fn new() -> Result<Self> {
        let prebin_home = paths::home::prebin_home()?;
        Ok(Self { prebin_home })
    }

    pub fn with_home(prebin_home: PathBuf) -> Self {
        Self { prebin_home }
    }

    pub fn prebin_home(&self) -> &Path {
        &self.prebin_home
    }

    pub fn install_path(&self, asset: &ReleaseAsset) -> PathBuf {
        paths::install::installation_directory(&self.prebin_home, &asset.slug)
    }

    pub fn installed_binary_path(&self, asset: &ReleaseAsset, binary_file_name: &str) -> PathBuf {
        self.install_path(asset).join(binary_file_name)
    }

    /// A version+platform counts as installed only when the binary is present
    /// and executable inside its install directory.
    pub fn is_installed(&self, asset: &ReleaseAsset, binary_file_name: &str) -> bool {
        let binary = self.installed_binary_path(asset, binary_file_name);
        binary.is_file() && file_ops::is_executable(&binary).unwrap_or(false)
    }

    /// Remove the install directory. Returns `false` when nothing was
    /// installed, so repeated uninstalls stay silent.
    pub fn remove_install(&self, asset: &ReleaseAsset) -> Result<bool> {
        let install_path = self.install_path(asset);
        if !install_path.exists() {
            return Ok(false);
        }

        self.guard_containment(&install_path)?;
        fs::remove_dir_all(&install_path)?;
        log::info!("Removed {}", install_path.display());
        Ok(true)
    }

    /// Remove the cached archive for the asset, if present.
    pub fn remove_cached_archive(&self, asset: &ReleaseAsset) -> Result<bool> {
        let archive_path =
            paths::cache::archive_file(&self.prebin_home, &asset.archive_file_name);
        if !archive_path.exists() {
            return Ok(false);
        }

        fs::remove_file(&archive_path)?;
        log::debug!("Removed cached archive {}", archive_path.display());
        Ok(true)
    }

    fn guard_containment(&self, path: &Path) -> Result<()> {
        if !path.starts_with(paths::install::installations_root(&self.prebin_home)) {
            return Err(PrebinError::SecurityError(format!(
                "Refusing to remove directory outside of the installs directory: {}",
                path.display()
            )));
        }
        Ok(())
    }
}
