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
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingSystem {
    Linux,
    Windows,
    MacOS,
}

impl FromStr for OperatingSystem {
    type Err = PrebinError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(OperatingSystem::Linux),
            "windows" | "windows_nt" | "win" => Ok(OperatingSystem::Windows),
            "macos" | "mac" | "darwin" => Ok(OperatingSystem::MacOS),
            _ => Err(PrebinError::InvalidConfig(format!(
                "Unknown operating system: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let os = match self {
            OperatingSystem::Linux => "linux",
            OperatingSystem::Windows => "windows",
            OperatingSystem::MacOS => "macos",
        };
        write!(f, "{os}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    X64,
    X86,
    Aarch64,
    Arm32,
}

impl FromStr for Architecture {
    type Err = PrebinError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "x64" | "amd64" | "x86_64" => Ok(Architecture::X64),
            "x86" | "i386" | "i686" => Ok(Architecture::X86),
            "aarch64" | "arm64" => Ok(Architecture::Aarch64),
            "arm32" | "arm" => Ok(Architecture::Arm32),
            _ => Err(PrebinError::InvalidConfig(format!(
                "Unknown architecture: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arch = match self {
            Architecture::X64 => "x64",
            Architecture::X86 => "x86",
            Architecture::Aarch64 => "aarch64",
            Architecture::Arm32 => "arm32",
        };
        write!(f, "{arch}")
    }
}

/// Host platform as an (operating system, architecture) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: OperatingSystem,
    pub arch: Architecture,
}

impl Platform {
    pub fn new(os: OperatingSystem, arch: Architecture) -> Self {
        Self { os, arch }
    }

    /// Detect the platform of the running process.
    pub fn detect() -> Result<Self> {
        resolve_platform(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Map the platform onto the target triple release archives are named
    /// after. Combinations with no published prebuilt binary are rejected.
    pub fn target_triple(&self) -> Result<&'static str> {
        match (self.os, self.arch) {
            (OperatingSystem::Windows, Architecture::X64) => Ok("x86_64-pc-windows-msvc"),
            (OperatingSystem::Linux, Architecture::X64) => Ok("x86_64-unknown-linux-musl"),
            (OperatingSystem::MacOS, Architecture::X64) => Ok("x86_64-apple-darwin"),
            (OperatingSystem::Windows, Architecture::Aarch64) => Ok("aarch64-pc-windows-msvc"),
            (OperatingSystem::Linux, Architecture::Aarch64) => Ok("aarch64-unknown-linux-musl"),
            (OperatingSystem::MacOS, Architecture::Aarch64) => Ok("aarch64-apple-darwin"),
            (os, arch) => Err(PrebinError::UnsupportedPlatform {
                os: os.to_string(),
                arch: arch.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.os, self.arch)
    }
}

fn resolve_platform(os: &str, arch: &str) -> Result<Platform> {
    let unsupported = || PrebinError::UnsupportedPlatform {
        os: os.to_string(),
        arch: arch.to_string(),
    };

    let os_parsed = OperatingSystem::from_str(os).map_err(|_| unsupported())?;
    let arch_parsed = Architecture::from_str(arch).map_err(|_| unsupported())?;
    Ok(Platform::new(os_parsed, arch_parsed))
}

/// Resolve an (os, arch) string pair straight to a target triple.
pub fn resolve_target_triple(os: &str, arch: &str) -> Result<&'static str> {
    resolve_platform(os, arch)?.target_triple()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_pairs_resolve_to_documented_triples() {
        let table = [
            ("windows", "x64", "x86_64-pc-windows-msvc"),
            ("linux", "x64", "x86_64-unknown-linux-musl"),
            ("macos", "x64", "x86_64-apple-darwin"),
            ("windows", "aarch64", "aarch64-pc-windows-msvc"),
            ("linux", "aarch64", "aarch64-unknown-linux-musl"),
            ("macos", "aarch64", "aarch64-apple-darwin"),
        ];

        for (os, arch, expected) in table {
            assert_eq!(resolve_target_triple(os, arch).unwrap(), expected);
        }
    }

    #[test]
    fn aliases_map_to_the_same_triple() {
        assert_eq!(
            resolve_target_triple("Windows_NT", "x86_64").unwrap(),
            "x86_64-pc-windows-msvc"
        );
        assert_eq!(
            resolve_target_triple("Darwin", "arm64").unwrap(),
            "aarch64-apple-darwin"
        );
    }

    #[test]
    fn unknown_os_fails_with_unsupported_platform() {
        let err = resolve_target_triple("freebsd", "x64").unwrap_err();
        match err {
            PrebinError::UnsupportedPlatform { os, arch } => {
                assert_eq!(os, "freebsd");
                assert_eq!(arch, "x64");
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn recognized_arch_without_release_fails_with_unsupported_platform() {
        // x86 parses but no release archive is published for it
        let err = resolve_target_triple("linux", "i686").unwrap_err();
        assert!(matches!(err, PrebinError::UnsupportedPlatform { .. }));
    }

    #[test]
    fn detect_matches_compile_time_constants() {
        let platform = Platform::detect().expect("test hosts are supported platforms");

        #[cfg(target_os = "linux")]
        assert_eq!(platform.os, OperatingSystem::Linux);
        #[cfg(target_os = "macos")]
        assert_eq!(platform.os, OperatingSystem::MacOS);
        #[cfg(windows)]
        assert_eq!(platform.os, OperatingSystem::Windows);
    }
}
