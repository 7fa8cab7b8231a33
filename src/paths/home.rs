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
use crate::paths::shared::ensure_child_directory;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "PREBIN_HOME";
pub const HOME_DIR_NAME: &str = ".prebin";

pub const INSTALLS_DIR: &str = "installs";
pub const CACHE_DIR: &str = "cache";
pub const LOCKS_DIR: &str = "locks";

/// Resolve the prebin home directory: `$PREBIN_HOME` when set to an absolute
/// path, otherwise `~/.prebin`.
pub fn prebin_home() -> Result<PathBuf> {
    if let Ok(home) = std::env::var(HOME_ENV) {
        let path = PathBuf::from(home);
        if path.is_absolute() {
            return Ok(path);
        }
    }

    dirs::home_dir()
        .map(|home| home.join(HOME_DIR_NAME))
        .ok_or_else(|| {
            PrebinError::InvalidConfig("Unable to determine home directory".to_string())
        })
}

pub fn installs_dir(prebin_home: &Path) -> PathBuf {
    prebin_home.join(INSTALLS_DIR)
}

pub fn cache_dir(prebin_home: &Path) -> PathBuf {
    prebin_home.join(CACHE_DIR)
}

pub fn locks_dir(prebin_home: &Path) -> PathBuf {
    prebin_home.join(LOCKS_DIR)
}

pub fn ensure_installs_dir(prebin_home: &Path) -> Result<PathBuf> {
    ensure_child_directory(prebin_home, INSTALLS_DIR)
}

pub fn ensure_cache_dir(prebin_home: &Path) -> Result<PathBuf> {
    ensure_child_directory(prebin_home, CACHE_DIR)
}
