//! Versioned schema migrations.
//!
//! Pending migrations are applied in version order inside one transaction and
//! each applied version is recorded in the `migrations` table, so a database
//! is either fully upgraded or left untouched.
//!
//! ```rust,no_run
//! use workpulse::db::migrations::{get_db_version, init_with_migrations};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("workpulse.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_info, msg_success};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

const CREATE_MIGRATIONS: &str = "CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";
const RECORD_MIGRATION: &str = "INSERT INTO migrations (version, name) VALUES (?1, ?2)";
const SELECT_VERSION: &str = "SELECT COALESCE(MAX(version), 0) FROM migrations";

/// Start and end are Unix seconds; a NULL end marks an open interval.
const CREATE_ACTIVITIES: &str = "CREATE TABLE IF NOT EXISTS activities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    start_time INTEGER NOT NULL,
    end_time INTEGER,
    activity_type TEXT NOT NULL
)";

struct Migration {
    version: u32,
    name: &'static str,
    statements: &'static [&'static str],
}

impl Migration {
    fn apply(&self, tx: &Transaction) -> Result<()> {
        for statement in self.statements {
            tx.execute(statement, [])?;
        }
        tx.execute(RECORD_MIGRATION, params![self.version, self.name])?;
        Ok(())
    }
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_activities",
        statements: &[CREATE_ACTIVITIES],
    },
    Migration {
        version: 2,
        name: "add_activity_indices",
        statements: &[
            "CREATE INDEX IF NOT EXISTS idx_activities_start ON activities(start_time)",
            "CREATE INDEX IF NOT EXISTS idx_activities_end ON activities(end_time)",
        ],
    },
];

pub struct MigrationManager {
    migrations: &'static [Migration],
}

impl MigrationManager {
    pub fn new() -> Self {
        Self { migrations: MIGRATIONS }
    }

    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(CREATE_MIGRATIONS, [])?;

        let current = self.current_version(conn);
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current).collect();
        if pending.is_empty() {
            msg_debug!(Message::MigrationsUpToDate(current));
            return Ok(());
        }

        msg_info!(Message::MigrationsFound(pending.len()));
        let tx = conn.transaction()?;
        for migration in pending {
            msg_info!(Message::RunningMigration(migration.version, migration.name.to_string()));
            if let Err(e) = migration.apply(&tx) {
                msg_error!(Message::MigrationFailed(migration.version, format!("{:#}", e)));
                return Err(e);
            }
            msg_success!(Message::MigrationCompleted(migration.version));
        }
        tx.commit()?;

        msg_success!(Message::AllMigrationsCompleted);
        Ok(())
    }

    /// Highest applied version; 0 when nothing was applied yet (or the
    /// bookkeeping table does not exist).
    fn current_version(&self, conn: &Connection) -> u32 {
        conn.query_row(SELECT_VERSION, [], |row| row.get(0)).unwrap_or(0)
    }

    fn latest_version(&self) -> u32 {
        self.migrations.iter().map(|m| m.version).max().unwrap_or(0)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    Ok(MigrationManager::new().current_version(conn))
}

pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    Ok(manager.current_version(conn) < manager.latest_version())
}
