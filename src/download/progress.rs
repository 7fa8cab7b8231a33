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

use super::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporting backed by an indicatif progress bar.
pub struct IndicatifProgressReporter {
    bar: Option<ProgressBar>,
    context: String,
}

impl IndicatifProgressReporter {
    pub fn new(context: &str) -> Self {
        Self {
            bar: None,
            context: context.to_string(),
        }
    }
}

impl ProgressReporter for IndicatifProgressReporter {
    fn on_start(&mut self, total_bytes: u64) {
        let bar = if total_bytes > 0 {
            let bar = ProgressBar::new(total_bytes);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
            );
            bar
        } else {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{msg} {spinner} {bytes} ({bytes_per_sec})")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar
        };
        bar.set_message(format!("Downloading {}", self.context));
        self.bar = Some(bar);
    }

    fn on_progress(&mut self, bytes_downloaded: u64) {
        if let Some(bar) = &self.bar {
            bar.set_position(bytes_downloaded);
        }
    }

    fn on_complete(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_with_message("Download complete");
        }
    }
}

/// No-op reporter used when progress output is disabled.
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn on_start(&mut self, _total_bytes: u64) {}

    fn on_progress(&mut self, _bytes_downloaded: u64) {}

    fn on_complete(&mut self) {}
}
