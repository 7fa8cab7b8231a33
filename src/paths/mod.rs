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

//! Canonical on-disk layout under the prebin home directory.
//!
//! Every path prebin touches is derived here, so the layout stays in one
//! place:
//!
//! ```text
//! $PREBIN_HOME/
//!   cache/<name>-v<version>-<triple>.tar.gz
//!   installs/<name>-v<version>-<triple>/
//!   installs/.tmp/<slug>-<uuid>/
//!   locks/install/<name>/<slug>.lock
//! ```

pub mod cache;
pub mod home;
pub mod install;
pub mod locking;
pub mod shared;
