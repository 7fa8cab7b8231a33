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

use prebin::platform::Platform;
use prebin::release::ReleaseAsset;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// A release archive matching the current host platform, ready to be seeded
/// into a prebin cache so installs run without any network access.
pub struct ReleaseFixture {
    pub name: String,
    pub version: String,
    pub repository: String,
    pub asset: ReleaseAsset,
    pub archive_bytes: Vec<u8>,
}

impl ReleaseFixture {
    /// Build a tar.gz whose single top-level directory contains an executable
    /// shell script named after the package, exiting with `exit_code`.
    pub fn script_release(name: &str, version: &str, exit_code: i32) -> Self {
        let script = format!("#!/bin/sh\necho \"{name} $@\"\nexit {exit_code}\n");
        Self::with_binary_contents(name, version, script.as_bytes())
    }

    pub fn with_binary_contents(name: &str, version: &str, contents: &[u8]) -> Self {
        let repository = "https://release-host.invalid/repo".to_string();
        let triple = Platform::detect()
            .expect("test host platform is supported")
            .target_triple()
            .expect("test host platform has a release triple");
        let asset = ReleaseAsset::locate(name, version, &repository, triple);

        let inner_dir = format!("{name}-v{version}");
        let binary_file = if cfg!(windows) {
            format!("{name}.exe")
        } else {
            name.to_string()
        };
        let archive_bytes = build_tar_gz(&[(
            format!("{inner_dir}/{binary_file}"),
            contents.to_vec(),
            0o755,
        )]);

        Self {
            name: name.to_string(),
            version: version.to_string(),
            repository,
            asset,
            archive_bytes,
        }
    }

    pub fn sha256(&self) -> String {
        sha256_hex(&self.archive_bytes)
    }

    /// Place the archive into the cache of the given prebin home.
    pub fn seed_cache(&self, prebin_home: &Path) -> PathBuf {
        let cache_dir = prebin_home.join("cache");
        fs::create_dir_all(&cache_dir).expect("create cache dir");
        let cache_path = cache_dir.join(&self.asset.archive_file_name);
        fs::write(&cache_path, &self.archive_bytes).expect("seed cached archive");
        cache_path
    }

    /// Write a manifest for this release into `dir` and return its path.
    pub fn write_manifest(&self, dir: &Path, sha256: Option<&str>) -> PathBuf {
        write_manifest(dir, &self.name, &self.version, &self.repository, sha256)
    }

    pub fn install_dir(&self, prebin_home: &Path) -> PathBuf {
        prebin_home.join("installs").join(&self.asset.slug)
    }

    /// File name of the packaged binary on the current platform.
    pub fn binary_file_name(&self) -> String {
        if cfg!(windows) {
            format!("{}.exe", self.name)
        } else {
            self.name.clone()
        }
    }
}

pub fn write_manifest(
    dir: &Path,
    name: &str,
    version: &str,
    repository: &str,
    sha256: Option<&str>,
) -> PathBuf {
    let mut contents = format!(
        "[package]\nname = \"{name}\"\nversion = \"{version}\"\nrepository = \"{repository}\"\n"
    );
    if let Some(digest) = sha256 {
        contents.push_str(&format!("sha256 = \"{digest}\"\n"));
    }

    let path = dir.join("prebin.toml");
    fs::write(&path, contents).expect("write manifest");
    path
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

fn build_tar_gz(entries: &[(String, Vec<u8>, u32)]) -> Vec<u8> {
    let temp = tempfile::tempdir().expect("tempdir");
    let tar_path = temp.path().join("fixture.tar.gz");

    let file = File::create(&tar_path).expect("create archive");
    let gz = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    let mut builder = tar::Builder::new(gz);

    for (path, contents, mode) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_path(path).expect("entry path");
        header.set_size(contents.len() as u64);
        header.set_mode(*mode);
        header.set_cksum();
        builder.append(&header, contents.as_slice()).expect("append entry");
    }

    builder.finish().expect("finish archive");
    drop(builder);

    fs::read(&tar_path).expect("read archive bytes")
}
