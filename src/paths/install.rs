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
use crate::paths::shared::ensure_nested_directory;
use std::path::{Path, PathBuf};

pub const TEMP_STAGING_DIR: &str = ".tmp";

pub fn installations_root(prebin_home: &Path) -> PathBuf {
    home::installs_dir(prebin_home)
}

pub fn ensure_installations_root(prebin_home: &Path) -> Result<PathBuf> {
    home::ensure_installs_dir(prebin_home)
}

pub fn installation_directory<S: AsRef<str>>(prebin_home: &Path, slug: S) -> PathBuf {
    installations_root(prebin_home).join(slug.as_ref())
}

pub fn temp_staging_directory(prebin_home: &Path) -> PathBuf {
    installations_root(prebin_home).join(TEMP_STAGING_DIR)
}

pub fn ensure_temp_staging_directory(prebin_home: &Path) -> Result<PathBuf> {
    ensure_nested_directory(prebin_home, [home::INSTALLS_DIR, TEMP_STAGING_DIR])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn installation_paths_follow_layout() {
        let home = Path::new("/opt/prebin");
        let slug = "foo-v1.2.3-x86_64-unknown-linux-musl";

        assert_eq!(
            installations_root(home),
            PathBuf::from("/opt/prebin/installs")
        );
        assert_eq!(
            installation_directory(home, slug),
            PathBuf::from("/opt/prebin/installs/foo-v1.2.3-x86_64-unknown-linux-musl")
        );
        assert_eq!(
            temp_staging_directory(home),
            PathBuf::from("/opt/prebin/installs/.tmp")
        );
    }

    #[test]
    fn ensure_helpers_create_directories() {
        let temp = TempDir::new().unwrap();
        let home = temp.path();

        let installs = ensure_installations_root(home).unwrap();
        let staging = ensure_temp_staging_directory(home).unwrap();

        assert!(installs.exists());
        assert!(staging.exists());
        assert_eq!(staging, home.join("installs").join(TEMP_STAGING_DIR));
    }
}
