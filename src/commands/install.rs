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

use crate::archive;
use crate::config::PrebinConfig;
use crate::download;
use crate::error::{PrebinError, Result};
use crate::locking::{LockController, LockScope};
use crate::platform::{Platform, file_ops};
use crate::release::ReleaseAsset;
use crate::storage::{BinaryInstaller, InstallRepository};

pub struct InstallCommand<'a> {
    config: &'a PrebinConfig,
    repository: InstallRepository,
}

impl<'a> InstallCommand<'a> {
    pub fn new(config: &'a PrebinConfig) -> Result<Self> {
        Ok(Self {
            config,
            repository: InstallRepository::new()?,
        })
    }

    pub fn with_repository(config: &'a PrebinConfig, repository: InstallRepository) -> Self {
        Self { config, repository }
    }

    pub fn execute(&self, force: bool, no_progress: bool, timeout: Option<u64>) -> Result<()> {
        let triple = Platform::detect()?.target_triple()?;
        let asset = ReleaseAsset::for_package(&self.config.package, triple);
        let binary_file_name = self.config.package.binary_file_name();

        // Fast path without taking the lock
        if !force && self.repository.is_installed(&asset, &binary_file_name) {
            log::info!("{} is already installed", asset.slug);
            println!(
                "{} {} is already installed",
                self.config.package.name, self.config.package.version
            );
            return Ok(());
        }

        let controller = LockController::new(self.repository.prebin_home());
        let lock = controller.acquire(LockScope::installation(&asset))?;

        let result = self.install_locked(&asset, &binary_file_name, force, no_progress, timeout);

        let release_result = controller.release(lock);
        result?;
        release_result?;
        Ok(())
    }

    fn install_locked(
        &self,
        asset: &ReleaseAsset,
        binary_file_name: &str,
        force: bool,
        no_progress: bool,
        timeout: Option<u64>,
    ) -> Result<()> {
        // A caller that waited on the lock observes the winner's completed
        // install and stops here.
        if self.repository.is_installed(asset, binary_file_name) {
            if !force {
                log::info!("{} was installed while waiting for the lock", asset.slug);
                println!(
                    "{} {} is already installed",
                    self.config.package.name, self.config.package.version
                );
                return Ok(());
            }
            self.repository.remove_install(asset)?;
        } else if self.repository.install_path(asset).exists() {
            // A directory without a usable binary is stale debris; replace it.
            log::warn!(
                "Replacing invalid install directory {}",
                self.repository.install_path(asset).display()
            );
            self.repository.remove_install(asset)?;
        }

        let archive_path = download::fetch_release_archive(
            self.config,
            asset,
            self.repository.prebin_home(),
            no_progress,
            timeout,
        )?;

        let context =
            BinaryInstaller::prepare_installation(self.repository.prebin_home(), &asset.slug)?;

        let staged = self.stage_archive(&archive_path, &context, binary_file_name);
        if let Err(err) = staged {
            let _ = BinaryInstaller::cleanup_failed_installation(&context);
            return Err(err);
        }

        let final_path = BinaryInstaller::finalize_installation(context)?;
        println!(
            "Installed {} {} to {}",
            self.config.package.name,
            self.config.package.version,
            final_path.display()
        );
        Ok(())
    }

    fn stage_archive(
        &self,
        archive_path: &std::path::Path,
        context: &crate::storage::InstallationContext,
        binary_file_name: &str,
    ) -> Result<()> {
        archive::extract_archive(archive_path, &context.temp_path)?;

        let source = BinaryInstaller::resolve_install_source(context)?;
        let binary = source.join(binary_file_name);
        if !binary.is_file() {
            return Err(PrebinError::Extract(format!(
                "Archive from {} does not contain expected binary '{binary_file_name}'",
                archive_path.display()
            )));
        }

        file_ops::make_executable(&binary)?;
        Ok(())
    }
}
