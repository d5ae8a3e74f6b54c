use crate::db::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "workpulse.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database in the user's data directory.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open(db_file_path)
    }

    /// Opens (or creates) the database at `path` and brings its schema up to date.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Db> {
        let mut conn = Connection::open(path)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }
}
