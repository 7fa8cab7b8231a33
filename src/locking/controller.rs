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
use crate::locking::handle::LockHandle;
use crate::locking::scope::LockScope;
use log::debug;
use std::fs::{self, File, OpenOptions, TryLockError};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(600);
const RETRY_DELAY: Duration = Duration::from_millis(50);

/// Coordinates advisory locking across processes.
pub struct LockController {
    prebin_home: PathBuf,
    timeout: Duration,
    retry_delay: Duration,
}

impl LockController {
    pub fn new<P: Into<PathBuf>>(prebin_home: P) -> Self {
        Self {
            prebin_home: prebin_home.into(),
            timeout: DEFAULT_LOCK_TIMEOUT,
            retry_delay: RETRY_DELAY,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Acquire the lock, waiting until the holder releases it or the timeout
    /// budget runs out.
    pub fn acquire(&self, scope: LockScope) -> Result<LockHandle> {
        let lock_path = self.ensure_lock_path(&scope)?;
        let file = self.prepare_lock_file(&lock_path).map_err(|err| {
            PrebinError::LockingAcquire {
                scope: scope.to_string(),
                details: format!("Failed to open lock file {}: {err}", lock_path.display()),
            }
        })?;

        let acquisition_start = Instant::now();
        let mut last_detail: Option<String> = None;

        loop {
            match try_lock_exclusive(&file) {
                Ok(()) => {
                    debug!(
                        "Acquired advisory lock for {scope} after {:.3}s",
                        acquisition_start.elapsed().as_secs_f64()
                    );
                    return Ok(LockHandle::new(scope, lock_path, file, acquisition_start));
                }
                Err(err) if err.kind() == io::ErrorKind::WouldBlock => {
                    if acquisition_start.elapsed() >= self.timeout {
                        let waited = acquisition_start.elapsed();
                        let detail =
                            last_detail.take().unwrap_or_else(|| err.to_string());
                        return Err(PrebinError::LockingTimeout {
                            scope: scope.to_string(),
                            waited_secs: waited.as_secs_f64(),
                            details: detail,
                        });
                    }

                    last_detail = Some(err.to_string());
                    thread::sleep(self.retry_delay);
                    continue;
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                    last_detail = Some(err.to_string());
                    continue;
                }
                Err(err) => {
                    return Err(PrebinError::LockingAcquire {
                        scope: scope.to_string(),
                        details: err.to_string(),
                    });
                }
            }
        }
    }

    /// Try to acquire the lock without waiting; `None` when contended.
    pub fn try_acquire(&self, scope: LockScope) -> Result<Option<LockHandle>> {
        let lock_path = self.ensure_lock_path(&scope)?;
        let file = self.prepare_lock_file(&lock_path).map_err(|err| {
            PrebinError::LockingAcquire {
                scope: scope.to_string(),
                details: format!("Failed to open lock file {}: {err}", lock_path.display()),
            }
        })?;

        match try_lock_exclusive(&file) {
            Ok(()) => Ok(Some(LockHandle::new(
                scope,
                lock_path,
                file,
                Instant::now(),
            ))),
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(err) => Err(PrebinError::LockingAcquire {
                scope: scope.to_string(),
                details: err.to_string(),
            }),
        }
    }

    pub fn release(&self, handle: LockHandle) -> Result<()> {
        handle.release()
    }

    fn ensure_lock_path(&self, scope: &LockScope) -> Result<PathBuf> {
        let lock_path = scope.lock_path(&self.prebin_home);
        let parent = lock_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.prebin_home.clone());

        fs::create_dir_all(&parent).map_err(|err| PrebinError::LockingAcquire {
            scope: scope.to_string(),
            details: format!(
                "Failed to ensure parent directory {} exists: {err}",
                parent.display()
            ),
        })?;

        Ok(lock_path)
    }

    fn prepare_lock_file(&self, lock_path: &Path) -> io::Result<File> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(lock_path, permissions)?;
        }

        Ok(file)
    }
}

fn try_lock_exclusive(file: &File) -> io::Result<()> {
    match file.try_lock() {
        Ok(()) => Ok(()),
        Err(TryLockError::WouldBlock) => Err(io::Error::new(
            io::ErrorKind::WouldBlock,
            "lock would block",
        )),
        Err(TryLockError::Error(err)) => Err(err),
    }
}
