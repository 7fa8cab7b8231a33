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
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tar::Archive as TarArchive;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Extract a tar+gzip release archive to the specified destination
pub fn extract_archive(archive_path: &Path, destination: &Path) -> Result<()> {
    fs::create_dir_all(destination)?;

    // Verify archive integrity before extraction
    verify_integrity(archive_path)?;

    extract_tar_gz(archive_path, destination)
}

fn verify_integrity(archive_path: &Path) -> Result<()> {
    let mut file = File::open(archive_path)?;
    let mut magic_bytes = [0u8; 2];
    file.read_exact(&mut magic_bytes).map_err(|_| {
        PrebinError::Extract(format!(
            "Cannot read archive header from {}",
            archive_path.display()
        ))
    })?;

    // Only tar+gzip archives are supported (gzip magic: 1f 8b)
    if magic_bytes != GZIP_MAGIC {
        return Err(PrebinError::Extract(format!(
            "Not a tar.gz archive: {}",
            archive_path.display()
        )));
    }

    // Try to read the first entry to verify the archive is valid
    let file = File::open(archive_path)?;
    let gz = flate2::read::GzDecoder::new(file);
    let mut archive = TarArchive::new(gz);

    let mut entries = archive
        .entries()
        .map_err(|e| PrebinError::Extract(format!("Unreadable archive: {e}")))?;
    if let Some(entry) = entries.next() {
        entry.map_err(|e| PrebinError::Extract(format!("Corrupt archive entry: {e}")))?;
    }
    Ok(())
}

fn extract_tar_gz(archive_path: &Path, destination: &Path) -> Result<()> {
    let file = File::open(archive_path)?;
    let gz = flate2::read::GzDecoder::new(file);
    let mut archive = TarArchive::new(gz);

    archive.set_preserve_permissions(true);
    archive.set_preserve_mtime(true);
    archive.set_overwrite(true);

    let mut extracted_count = 0;
    let entries = archive
        .entries()
        .map_err(|e| PrebinError::Extract(format!("Unreadable archive: {e}")))?;

    for entry in entries {
        let mut entry =
            entry.map_err(|e| PrebinError::Extract(format!("Corrupt archive entry: {e}")))?;
        let path = entry
            .path()
            .map_err(|e| PrebinError::Extract(format!("Invalid entry path: {e}")))?
            .into_owned();

        // Security check: ensure paths don't escape destination
        validate_entry_path(&path)?;

        let dest_path = destination.join(&path);

        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }

        entry
            .unpack(&dest_path)
            .map_err(|e| PrebinError::Extract(format!("Failed to unpack {path:?}: {e}")))?;
        extracted_count += 1;

        if extracted_count % 100 == 0 {
            log::debug!("Extracted {extracted_count} files...");
        }
    }

    log::info!("Extracted {extracted_count} files from tar.gz archive");
    Ok(())
}

fn validate_entry_path(entry_path: &Path) -> Result<()> {
    for component in entry_path.components() {
        match component {
            std::path::Component::ParentDir => {
                return Err(PrebinError::SecurityError(format!(
                    "Archive contains path traversal: {entry_path:?}"
                )));
            }
            std::path::Component::RootDir => {
                return Err(PrebinError::SecurityError(format!(
                    "Archive contains absolute path: {entry_path:?}"
                )));
            }
            _ => {}
        }
    }

    // Additional check: normalize the path and verify it doesn't escape
    let normalized = normalize_path(entry_path);
    if normalized.starts_with("..") || normalized.starts_with("/") || normalized.starts_with("\\") {
        return Err(PrebinError::SecurityError(format!(
            "Archive entry would extract outside destination: {entry_path:?}"
        )));
    }

    Ok(())
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            std::path::Component::Normal(c) => normalized.push(c),
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            std::path::Component::RootDir => normalized.push("/"),
            std::path::Component::Prefix(_) => {} // Windows drive letters - ignore
        }
    }

    normalized
}
