//! Store connection and schema verification

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::debug;

use blogdb_core::{COLUMNS, TABLE_NAME};

use crate::config::StoreConfig;
use crate::error::{DatabaseError, Result};

/// How the store file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadOnly,
    ReadWrite,
}

impl AccessMode {
    fn open_flags(self) -> OpenFlags {
        // Never SQLITE_OPEN_CREATE: the Post table is provisioned elsewhere
        let access = match self {
            AccessMode::ReadOnly => OpenFlags::SQLITE_OPEN_READ_ONLY,
            AccessMode::ReadWrite => OpenFlags::SQLITE_OPEN_READ_WRITE,
        };
        access | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX
    }
}

/// Single connection to the blog store
///
/// Dropping the value releases the connection; `close` does the same but
/// reports a failing close.
pub struct Database {
    pub(super) conn: Connection,
    path: PathBuf,
}

impl Database {
    /// Open the store and check that the `Post` table has the expected layout
    pub fn open(config: &StoreConfig, mode: AccessMode) -> Result<Self> {
        let conn = Connection::open_with_flags(&config.path, mode.open_flags()).map_err(
            |source| DatabaseError::Connection {
                path: config.path.clone(),
                source,
            },
        )?;

        conn.busy_timeout(config.busy_timeout())
            .map_err(|source| DatabaseError::Connection {
                path: config.path.clone(),
                source,
            })?;

        let db = Self {
            conn,
            path: config.path.clone(),
        };
        db.verify_schema()?;

        debug!("Opened store {:?} ({:?})", db.path, mode);
        Ok(db)
    }

    /// Path the store was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the connection, surfacing any error from SQLite
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_conn, err)| DatabaseError::Close(err))
    }

    /// Compare the live `Post` columns against `COLUMNS`
    ///
    /// Runs as part of opening, so a store that cannot be read here (locked,
    /// not a database) is reported as a connection failure.
    fn verify_schema(&self) -> Result<()> {
        let columns = self.table_columns().map_err(|source| DatabaseError::Connection {
            path: self.path.clone(),
            source,
        })?;

        if columns.is_empty() {
            return Err(DatabaseError::Schema(format!(
                "table {} not found",
                TABLE_NAME
            )));
        }

        let matches = columns.len() == COLUMNS.len()
            && columns
                .iter()
                .zip(COLUMNS)
                .all(|(actual, expected)| actual.eq_ignore_ascii_case(expected));

        if !matches {
            return Err(DatabaseError::Schema(format!(
                "table {} has columns ({}), expected ({})",
                TABLE_NAME,
                columns.join(", "),
                COLUMNS.join(", ")
            )));
        }

        Ok(())
    }

    fn table_columns(&self) -> rusqlite::Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")?;
        let columns = stmt
            .query_map([TABLE_NAME], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(columns)
    }
}
