pub mod models;
pub mod operations;
pub mod schema;

use diesel::RunQueryDsl;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use log::{debug, info};

use crate::config::StoreConfig;
use crate::errors::StoreError;

pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;
pub type SqlitePooledConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Applied to every connection the pool opens.
#[derive(Debug)]
struct ConnectionPragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Handle to the workout database.
///
/// Owns a connection pool; every operation checks a connection out for the
/// duration of its statements and hands it back on return. Cloning is cheap
/// and shares the pool.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
    config: StoreConfig,
}

impl Store {
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        debug!(
            "Opening store at {} with {} connection(s)",
            config.database_url,
            config.effective_pool_size()
        );
        let manager = ConnectionManager::<SqliteConnection>::new(config.database_url.clone());
        let mut builder = SqlitePool::builder()
            .max_size(config.effective_pool_size())
            .connection_customizer(Box::new(ConnectionPragmas));
        if config.is_in_memory() {
            // dropping the only connection would drop the database with it
            builder = builder
                .min_idle(Some(1))
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = builder.build(manager)?;
        Ok(Self { pool, config })
    }

    /// Opens the store and makes sure the schema exists.
    pub fn open_and_initialize(config: StoreConfig) -> Result<Self, StoreError> {
        let store = Self::open(config)?;
        store.initialize()?;
        Ok(store)
    }

    pub(crate) fn conn(&self) -> Result<SqlitePooledConnection, StoreError> {
        Ok(self.pool.get()?)
    }

    /// Creates the `users` and `workouts` tables if they are missing. Safe to call
    /// on every start.
    pub fn initialize(&self) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        for statement in parse_sql_statements(SCHEMA_SQL) {
            diesel::sql_query(statement).execute(&mut conn)?;
        }
        info!("Store schema ready at {}", self.config.database_url);
        Ok(())
    }
}

fn parse_sql_statements(sql: &str) -> Vec<String> {
    sql.lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with("--")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
