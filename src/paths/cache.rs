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

use crate::error::Result;
use crate::paths::home;
use std::path::{Path, PathBuf};

pub fn cache_root(prebin_home: &Path) -> PathBuf {
    home::cache_dir(prebin_home)
}

pub fn ensure_cache_root(prebin_home: &Path) -> Result<PathBuf> {
    home::ensure_cache_dir(prebin_home)
}

/// Path of a cached release archive.
pub fn archive_file(prebin_home: &Path, file_name: &str) -> PathBuf {
    cache_root(prebin_home).join(file_name)
}
