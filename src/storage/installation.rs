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

use crate::error::{PrebinError, Result};
use crate::paths::install;
use std::fs;
use std::path::{Path, PathBuf};

/// Staging state for one install attempt. The final path only comes into
/// existence through `finalize_installation`'s atomic rename.
#[derive(Debug)]
pub struct InstallationContext {
    pub final_path: PathBuf,
    pub temp_path: PathBuf,
}

pub struct BinaryInstaller;

impl BinaryInstaller {
    /// Create a fresh staging directory for `slug` and sweep residue left by
    /// crashed installs of the same slug. Callers hold the installation lock,
    /// so anything staged under this slug belongs to a dead process.
    pub fn prepare_installation(prebin_home: &Path, slug: &str) -> Result<InstallationContext> {
        install::ensure_installations_root(prebin_home)?;
        let final_path = install::installation_directory(prebin_home, slug);
        let staging_root = install::ensure_temp_staging_directory(prebin_home)?;

        Self::sweep_stale_staging(&staging_root, slug);

        let temp_name = format!("{slug}.{}", uuid::Uuid::new_v4());
        let temp_path = staging_root.join(temp_name);
        fs::create_dir(&temp_path)?;

        Ok(InstallationContext {
            final_path,
            temp_path,
        })
    }

    fn sweep_stale_staging(staging_root: &Path, slug: &str) {
        let Ok(entries) = fs::read_dir(staging_root) else {
            return;
        };

        let prefix = format!("{slug}.");
        for entry in entries.flatten() {
            let name = entry.file_name();
            if name.to_string_lossy().starts_with(&prefix) {
                log::debug!(
                    "Removing stale staging directory {}",
                    entry.path().display()
                );
                let _ = fs::remove_dir_all(entry.path());
            }
        }
    }

    /// Directory inside the staging area that becomes the install directory.
    ///
    /// Archives that wrap their content in a single top-level directory are
    /// flattened so the binary always lands directly under the install path.
    pub fn resolve_install_source(context: &InstallationContext) -> Result<PathBuf> {
        let entries: Vec<_> = fs::read_dir(&context.temp_path)?
            .filter_map(|entry| entry.ok())
            .collect();

        if entries.is_empty() {
            return Err(PrebinError::Extract(format!(
                "Archive extracted no files into {}",
                context.temp_path.display()
            )));
        }

        if entries.len() == 1 {
            let entry = &entries[0];
            if entry.file_type()?.is_dir() {
                return Ok(entry.path());
            }
        }

        Ok(context.temp_path.clone())
    }

    pub fn finalize_installation(context: InstallationContext) -> Result<PathBuf> {
        if let Some(parent) = context.final_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let source_path = Self::resolve_install_source(&context)?;

        fs::rename(&source_path, &context.final_path).inspect_err(|_| {
            let _ = fs::remove_dir_all(&context.temp_path);
        })?;

        if source_path != context.temp_path {
            let _ = fs::remove_dir_all(&context.temp_path);
        }

        Ok(context.final_path)
    }

    pub fn cleanup_failed_installation(context: &InstallationContext) -> Result<()> {
        if context.temp_path.exists() {
            fs::remove_dir_all(&context.temp_path)?;
        }
        Ok(())
    }
}
