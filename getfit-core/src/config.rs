use std::env;

/// File name used when nothing else is configured.
pub const DEFAULT_DATABASE_URL: &str = "GetFit.db";
pub const MEMORY_DATABASE_URL: &str = ":memory:";
const DEFAULT_POOL_SIZE: u32 = 4;

/// Where the store lives and how many connections it may hold open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_url: String,
    pub pool_size: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_URL)
    }
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: normalize_url(database_url.into()),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MEMORY_DATABASE_URL)
    }

    /// Reads `DATABASE_URL` and `GETFIT_POOL_SIZE` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(Self::new)
            .unwrap_or_default();
        if let Some(size) = lookup("GETFIT_POOL_SIZE").and_then(|s| s.trim().parse().ok()) {
            config.pool_size = size;
        }
        config
    }

    pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = normalize_url(database_url.into());
        self
    }

    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }

    /// An in-memory database exists per connection, so it gets exactly one.
    pub(crate) fn effective_pool_size(&self) -> u32 {
        if self.is_in_memory() {
            1
        } else {
            self.pool_size.max(1)
        }
    }
}

fn normalize_url(url: String) -> String {
    match url.strip_prefix("sqlite://") {
        Some(path) => path.to_string(),
        None => url,
    }
}
