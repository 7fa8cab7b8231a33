use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

/// Creates a test home directory under target/home with a random 8-character name
/// Returns the path to the created directory
/// The directory will be automatically cleaned up when the returned guard is dropped
pub struct TestHomeGuard {
    path: PathBuf,
}

impl TestHomeGuard {
    pub fn new() -> Self {
        // Generate random 8-character string with letters and numbers
        let random_name: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(8)
            .map(char::from)
            .collect();

        // Create directory under target/home
        let path = PathBuf::from("target/home").join(random_name);
        fs::create_dir_all(&path).expect("Failed to create test home directory");

        // PREBIN_HOME must be absolute for the env override to take effect
        let path = path
            .canonicalize()
            .expect("Failed to canonicalize test home directory");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn prebin_home(&self) -> PathBuf {
        self.path.join(".prebin")
    }

    pub fn setup_prebin_structure(&self) -> &Self {
        let prebin_home = self.prebin_home();
        fs::create_dir_all(&prebin_home).expect("Failed to create .prebin directory");
        fs::create_dir_all(prebin_home.join("installs"))
            .expect("Failed to create installs directory");
        fs::create_dir_all(prebin_home.join("cache")).expect("Failed to create cache directory");
        self
    }
}

impl Drop for TestHomeGuard {
    fn drop(&mut self) {
        if self.path.exists() {
            fs::remove_dir_all(&self.path).unwrap_or_else(|e| {
                eprintln!(
                    "Failed to cleanup test directory {}: {}",
                    self.path.display(),
                    e
                );
            });
        }
    }
}
