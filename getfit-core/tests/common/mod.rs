//! Shared fixtures for the store and session integration tests.
#![allow(dead_code)]

use getfit::config::StoreConfig;
use getfit::db::Store;
use tempfile::TempDir;

/// A store backed by a database file in a fresh temporary directory.
pub struct TestHarness {
    pub store: Store,
    dir: TempDir,
}

impl TestHarness {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("GetFit.db");
        let store = Store::open_and_initialize(StoreConfig::new(path.to_string_lossy()))
            .expect("store should open");
        TestHarness { store, dir }
    }

    /// A harness with one registered user; returns the user's id too.
    pub fn with_user(name: &str) -> (Self, i32) {
        let harness = Self::new();
        let user_id = harness.store.register_user(name).expect("register");
        (harness, user_id)
    }

    pub fn database_path(&self) -> std::path::PathBuf {
        self.dir.path().join("GetFit.db")
    }

    pub fn log(&self, user_id: i32, exercise: &str, date: &str, duration: i64, calories: i64) {
        self.store
            .log_workout(user_id, exercise, date, duration, calories)
            .expect("log workout");
    }
}
