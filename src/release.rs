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

//! Release-asset location.
//!
//! Derives the download URL and local names for a versioned, platform-specific
//! release archive. Pure computation; all I/O happens elsewhere.

use crate::config::PackageConfig;

const ARCHIVE_EXTENSION: &str = "tar.gz";

/// A located release asset for one (package, version, platform) combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAsset {
    /// Full download URL of the release archive.
    pub url: String,
    /// File name of the archive in the local cache.
    pub archive_file_name: String,
    /// Directory name the archive installs into, also used for lock naming.
    pub slug: String,
    /// Package name the asset belongs to.
    pub package: String,
    /// Package version the asset belongs to.
    pub version: String,
}

impl ReleaseAsset {
    /// Compose the asset location for a release published at
    /// `{repository}/releases/download/v{version}/{name}-v{version}-{triple}.tar.gz`.
    pub fn locate(name: &str, version: &str, repository_url: &str, triple: &str) -> Self {
        let base = repository_url.trim_end_matches('/');
        let slug = format!("{name}-v{version}-{triple}");
        let archive_file_name = format!("{slug}.{ARCHIVE_EXTENSION}");
        let url = format!("{base}/releases/download/v{version}/{archive_file_name}");

        Self {
            url,
            archive_file_name,
            slug,
            package: name.to_string(),
            version: version.to_string(),
        }
    }

    pub fn for_package(package: &PackageConfig, triple: &str) -> Self {
        Self::locate(&package.name, &package.version, &package.repository, triple)
    }
}
