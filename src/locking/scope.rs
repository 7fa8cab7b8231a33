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

use crate::paths::locking::install_lock_path;
use crate::release::ReleaseAsset;
use std::fmt;
use std::path::{Path, PathBuf};

/// Describes the scope of a lock to be acquired through the locking controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockScope {
    Installation { package: String, slug: String },
}

impl LockScope {
    pub fn installation(asset: &ReleaseAsset) -> Self {
        Self::Installation {
            package: asset.package.clone(),
            slug: asset.slug.clone(),
        }
    }

    /// Returns the on-disk path for this scope relative to the prebin home directory.
    pub fn lock_path(&self, prebin_home: &Path) -> PathBuf {
        match self {
            LockScope::Installation { package, slug } => {
                install_lock_path(prebin_home, package, slug)
            }
        }
    }

    /// Human-readable label used for logging and error reporting.
    pub fn label(&self) -> String {
        match self {
            LockScope::Installation { slug, .. } => format!("installation {slug}"),
        }
    }
}

impl fmt::Display for LockScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
