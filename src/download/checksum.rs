use crate::error::{PrebinError, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const CHECKSUM_CHUNK_SIZE: usize = 8192;

pub fn verify_checksum(file_path: &Path, expected: &str) -> Result<()> {
    let calculated = calculate_sha256(file_path)?;

    if !calculated.eq_ignore_ascii_case(expected) {
        return Err(PrebinError::ChecksumMismatch {
            expected: expected.to_string(),
            actual: calculated,
        });
    }

    Ok(())
}

pub fn calculate_sha256(file_path: &Path) -> Result<String> {
    let mut file = File::open(file_path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHECKSUM_CHUNK_SIZE];

    loop {
        match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buffer[..n]),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(format!("{:x}", hasher.finalize()))
}
