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

use crate::error::PrebinError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a PrebinError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a PrebinError) -> Self {
        let (suggestion, details) = match error {
            PrebinError::UnsupportedPlatform { os, arch } => {
                let suggestion = Some(
                    "No prebuilt binary is published for this platform. Check the project's \
                     release page for the list of supported targets."
                        .to_string(),
                );
                let details = Some(format!("Detected host platform: {os} {arch}"));
                (suggestion, details)
            }
            PrebinError::Download { url, status } => {
                let suggestion = Some(
                    "Check your internet connection and that the release exists. Use --timeout \
                     to increase the timeout if needed."
                        .to_string(),
                );
                let details = match status {
                    Some(code) => Some(format!("Server returned HTTP {code} for {url}")),
                    None => Some(format!("Request to {url} failed after retries")),
                };
                (suggestion, details)
            }
            PrebinError::ChecksumMismatch { expected, actual } => {
                let suggestion = Some(
                    "Try downloading again. If the problem persists, the published archive may \
                     not match the checksum in the manifest."
                        .to_string(),
                );
                let details = Some(format!("Expected sha256 {expected}, got {actual}"));
                (suggestion, details)
            }
            PrebinError::Extract(msg) => {
                let suggestion =
                    Some("Ensure you have enough disk space and try again.".to_string());
                let details = Some(format!("Extraction failed: {msg}"));
                (suggestion, details)
            }
            PrebinError::NotInstalled { package, .. } => {
                let suggestion = Some(format!(
                    "Run 'prebin install' to install {package} before running it."
                ));
                (suggestion, None)
            }
            PrebinError::LockingTimeout { scope, .. } => {
                let suggestion = Some(format!(
                    "Another process is holding the {scope} lock. Wait for it to finish and try \
                     again."
                ));
                (suggestion, None)
            }
            PrebinError::ConfigFile(msg) | PrebinError::InvalidConfig(msg) => {
                let suggestion = Some(
                    "Check the prebin.toml manifest: [package] must supply non-empty name, \
                     version and an https repository URL."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            PrebinError::PermissionDenied(msg) => {
                let suggestion =
                    Some("Check file permissions on the prebin home directory.".to_string());
                let details = Some(msg.clone());
                (suggestion, details)
            }
            PrebinError::SecurityError(msg) => {
                let details = Some(msg.clone());
                (None, details)
            }
            PrebinError::Http(e) => {
                let suggestion =
                    Some("Check your internet connection and try again.".to_string());
                let details = Some(format!("HTTP error: {e}"));
                (suggestion, details)
            }
            _ => (None, None),
        };

        Self {
            error,
            suggestion,
            details,
        }
    }
}

impl fmt::Display for ErrorContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\n{details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\n{suggestion}")?;
        }

        Ok(())
    }
}
