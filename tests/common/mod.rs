//! Shared scaffolding for the integration suite.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use software_catalog::db::{DbPool, establish_connection_pool};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// A migrated SQLite catalog living in a temp file for the duration of one
/// test. The file is removed when the value drops.
pub struct TestDb {
    _dbfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let dbfile = NamedTempFile::new().expect("Failed to create a database file");
        let pool = establish_connection_pool(dbfile.path().to_str().unwrap())
            .expect("Failed to build the connection pool");
        let mut conn = pool.get().expect("Failed to check out a connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Failed to run the catalog migrations");
        TestDb {
            _dbfile: dbfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}
