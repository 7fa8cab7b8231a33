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
use crate::error::{PrebinError, Result};
use crate::platform::{Platform, process};
use crate::release::ReleaseAsset;
use crate::storage::InstallRepository;
use std::ffi::OsString;

pub struct RunCommand<'a> {
    config: &'a PrebinConfig,
    repository: InstallRepository,
}

impl<'a> RunCommand<'a> {
    pub fn new(config: &'a PrebinConfig) -> Result<Self> {
        Ok(Self {
            config,
            repository: InstallRepository::new()?,
        })
    }

    pub fn with_repository(config: &'a PrebinConfig, repository: InstallRepository) -> Self {
        Self { config, repository }
    }

    /// Execute the installed binary with the given arguments.
    ///
    /// Standard streams are inherited and the child's exit code becomes this
    /// process's exit code. Nothing here touches the network.
    pub fn execute(&self, args: Vec<OsString>) -> Result<()> {
        let triple = Platform::detect()?.target_triple()?;
        let asset = ReleaseAsset::for_package(&self.config.package, triple);
        let binary_file_name = self.config.package.binary_file_name();

        if !self.repository.is_installed(&asset, &binary_file_name) {
            return Err(PrebinError::NotInstalled {
                package: self.config.package.name.clone(),
                version: self.config.package.version.clone(),
            });
        }

        let binary = self.repository.installed_binary_path(&asset, &binary_file_name);
        log::debug!("Executing {} with {} args", binary.display(), args.len());
        process::exec_binary(&binary, args)
    }
}
