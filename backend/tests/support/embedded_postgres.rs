//! Embedded PostgreSQL helpers for repository integration tests.
//!
//! A single cluster is shared per test binary. Each test gets its own
//! temporary database with the embedded migrations applied, so suites can run
//! in parallel without seeing each other's rows.
//!
//! Set `SKIP_TEST_CLUSTER=1` where the cluster cannot start (no network for
//! the PostgreSQL download, restricted sandboxes); affected tests then return
//! early instead of failing.

use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use bonds_backend::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CLUSTER_RETRIES: usize = 3;
const CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);
const STABLE_PASSWORD: &str = "bonds_embedded_test";

/// Returns true when `SKIP_TEST_CLUSTER` is set to "1", "true" or "yes".
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Report a cluster setup failure.
///
/// Returns `None` when skipping is enabled; panics otherwise so CI breakage is
/// not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Shared cluster for this test binary, bootstrapped on first use.
///
/// `PG_PASSWORD` is pinned during bootstrap so a reused data directory keeps
/// accepting the password it was initialised with.
fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let _bootstrap = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());
    let _password = std::env::var_os("PG_PASSWORD")
        .is_none()
        .then(|| env_lock::lock_env([("PG_PASSWORD", Some(STABLE_PASSWORD.to_owned()))]));

    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt < CLUSTER_RETRIES => {
                eprintln!("pg-embed: attempt {attempt}/{CLUSTER_RETRIES} failed: {error:?}");
                std::thread::sleep(CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
            Err(error) => return Err(format!("{error:?}")),
        }
    }
}

/// Create a fresh database on the shared cluster and migrate it.
pub fn migrated_database() -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster()?;
    let database = cluster
        .temporary_database(format!("test_{}", uuid::Uuid::new_v4().simple()).as_str())
        .map_err(|err| format!("create database: {err:?}"))?;
    run_pending_migrations(&database.url().to_string()).map_err(|err| format!("migrate: {err}"))?;
    Ok(database)
}
