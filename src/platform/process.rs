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

//! Platform-specific process execution.
//!
//! The installed binary is launched with exec() on Unix systems, so the child
//! takes over the process entirely, and with CreateProcess plus a synchronous
//! wait on Windows. Either way the caller's exit code is the child's.

use crate::error::{PrebinError, Result};
use std::ffi::OsString;
use std::path::Path;

/// Execute the installed binary, replacing the current process.
///
/// The executed process inherits:
/// - All environment variables
/// - Standard input/output/error streams
/// - Working directory
#[cfg(unix)]
pub fn exec_binary(program: &Path, args: Vec<OsString>) -> Result<()> {
    use std::os::unix::process::CommandExt;
    use std::process::Command;

    // exec() only returns on error
    let err = Command::new(program).args(args).exec();

    Err(PrebinError::SystemError(format!(
        "Failed to execute {}: {err}",
        program.display()
    )))
}

/// Execute the installed binary on Windows (cannot replace process).
#[cfg(windows)]
pub fn exec_binary(program: &Path, args: Vec<OsString>) -> Result<()> {
    use std::process::{Command, Stdio};

    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| {
            PrebinError::SystemError(format!("Failed to execute {}: {e}", program.display()))
        })?;

    // Exit with the same code as the child process
    std::process::exit(status.code().unwrap_or(1));
}
