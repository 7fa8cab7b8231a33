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

use crate::paths::home;
use crate::paths::shared::sanitize_segment;
use std::path::{Path, PathBuf};

const INSTALL_DIR: &str = "install";

pub fn locks_root(prebin_home: &Path) -> PathBuf {
    home::locks_dir(prebin_home)
}

pub fn install_lock_directory(prebin_home: &Path, package: &str) -> PathBuf {
    let normalized = sanitize_segment(package).unwrap_or_else(|| "default".to_string());
    locks_root(prebin_home).join(INSTALL_DIR).join(normalized)
}

pub fn install_lock_path(prebin_home: &Path, package: &str, slug: &str) -> PathBuf {
    let file_name = format!("{slug}.lock");
    install_lock_directory(prebin_home, package).join(file_name)
}
