mod common;

use common::{ReleaseFixture, TestHomeGuard};
use prebin::commands::install::InstallCommand;
use prebin::config::{DownloadConfig, PackageConfig, PrebinConfig};
use prebin::locking::{LockController, LockScope};
use prebin::storage::InstallRepository;
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;

fn config_for(fixture: &ReleaseFixture) -> PrebinConfig {
    PrebinConfig {
        package: PackageConfig {
            name: fixture.name.clone(),
            version: fixture.version.clone(),
            repository: fixture.repository.clone(),
            sha256: None,
            binary: None,
        },
        download: DownloadConfig::default(),
    }
}

#[test]
fn concurrent_installs_converge_to_one_install() {
    let test_home = TestHomeGuard::new();
    test_home.setup_prebin_structure();
    let prebin_home = test_home.prebin_home();

    let fixture = ReleaseFixture::script_release("foo", "1.2.3", 0);
    fixture.seed_cache(&prebin_home);

    let barrier = Arc::new(Barrier::new(2));
    let mut handles = Vec::new();

    for _ in 0..2 {
        let barrier = Arc::clone(&barrier);
        let prebin_home = prebin_home.clone();
        let fixture_config = config_for(&fixture);

        handles.push(thread::spawn(move || {
            let repository = InstallRepository::with_home(prebin_home);
            let command = InstallCommand::with_repository(&fixture_config, repository);
            barrier.wait();
            command.execute(false, true, None)
        }));
    }

    for handle in handles {
        handle
            .join()
            .expect("install thread panicked")
            .expect("concurrent install failed");
    }

    // Both callers observe the same final state
    let binary = fixture.install_dir(&prebin_home).join(fixture.binary_file_name());
    assert!(binary.is_file());

    // No staging residue survives
    let staging_root = prebin_home.join("installs").join(".tmp");
    if staging_root.exists() {
        let leftovers: Vec<_> = fs::read_dir(&staging_root)
            .unwrap()
            .filter_map(|e| e.ok())
            .collect();
        assert!(
            leftovers.is_empty(),
            "staging directory should be empty after both installs"
        );
    }
}

#[test]
fn installation_lock_serializes_writers() {
    let test_home = TestHomeGuard::new();
    test_home.setup_prebin_structure();
    let prebin_home = test_home.prebin_home();

    let fixture = ReleaseFixture::script_release("foo", "1.2.3", 0);
    let controller = LockController::new(&prebin_home);
    let scope = LockScope::installation(&fixture.asset);

    let primary = controller.acquire(scope.clone()).unwrap();

    let second = controller.try_acquire(scope.clone()).unwrap();
    assert!(
        second.is_none(),
        "secondary acquisition should block while lock held"
    );

    controller.release(primary).unwrap();

    let third = controller.try_acquire(scope).unwrap();
    assert!(third.is_some(), "lock is free after the holder releases");
}
