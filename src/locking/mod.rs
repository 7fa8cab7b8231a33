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

//! Cross-process mutual exclusion for installation work.
//!
//! Installs are serialized per (package, version, platform) slug with an
//! advisory file lock. Only processes that go through this module are
//! excluded; the lock carries no weight against arbitrary writers.

pub mod controller;
pub mod handle;
pub mod scope;

pub use controller::LockController;
pub use handle::LockHandle;
pub use scope::LockScope;
