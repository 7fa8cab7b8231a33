// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::PrebinConfig;
use crate::error::Result;
use crate::platform::Platform;
use crate::release::ReleaseAsset;
use crate::storage::InstallRepository;

pub struct UninstallCommand<'a> {
    config: &'a PrebinConfig,
    repository: InstallRepository,
}

impl<'a> UninstallCommand<'a> {
    pub fn new(config: &'a PrebinConfig) -> Result<Self> {
        Ok(Self {
            config,
            repository: InstallRepository::new()?,
        })
    }

    pub fn with_repository(config: &'a PrebinConfig, repository: InstallRepository) -> Self {
        Self { config, repository }
    }

    /// Remove the installed binary and its cached archive. Succeeds silently
    /// when nothing is installed.
    pub fn execute(&self) -> Result<()> {
        let triple = Platform::detect()?.target_triple()?;
        let asset = ReleaseAsset::for_package(&self.config.package, triple);

        let removed = self.repository.remove_install(&asset)?;
        self.repository.remove_cached_archive(&asset)?;

        if removed {
            println!(
                "Uninstalled {} {}",
                self.config.package.name, self.config.package.version
            );
        } else {
            log::info!("{} is not installed, nothing to do", asset.slug);
            println!(
                "{} {} is not installed",
                self.config.package.name, self.config.package.version
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DownloadConfig, PackageConfig};
    use std::fs;
    use tempfile::TempDir;

    fn test_config() -> PrebinConfig {
        PrebinConfig {
            package: PackageConfig {
                name: "foo".to_string(),
                version: "1.2.3".to_string(),
                repository: "https://example.com/r".to_string(),
                sha256: None,
                binary: None,
            },
            download: DownloadConfig::default(),
        }
    }

    #[test]
    fn uninstall_twice_succeeds_both_times() {
        let temp = TempDir::new().unwrap();
        let config = test_config();

        let triple = Platform::detect().unwrap().target_triple().unwrap();
        let asset = ReleaseAsset::for_package(&config.package, triple);
        let repository = InstallRepository::with_home(temp.path().to_path_buf());
        fs::create_dir_all(repository.install_path(&asset)).unwrap();

        let command = UninstallCommand::with_repository(
            &config,
            InstallRepository::with_home(temp.path().to_path_buf()),
        );

        command.execute().unwrap();
        assert!(!temp
            .path()
            .join("installs")
            .join(&asset.slug)
            .exists());

        // Idempotent: a second uninstall is a silent success
        command.execute().unwrap();
    }
}
