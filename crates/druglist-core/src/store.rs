//! Store: the SQLite-backed `drugs` table.
//!
//! The store owns a single connection behind a mutex. It is constructed
//! explicitly at startup ([`Store::open`] / [`Store::in_memory`]), shared by
//! reference or `Arc`, and closed explicitly with [`Store::close`].
//!
//! [`Store::replace_all`] runs delete + insert inside one transaction, so a
//! reader sees either the old table or the new one, never a mix.

// SQLite returns i64 for counts; they are never negative.
#![allow(clippy::cast_sign_loss)]

use crate::error::{Error, Result};
use crate::types::{DrugRecord, StoredDrug};
use rusqlite::{params, Connection, OpenFlags, Row};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Largest page size [`Store::query`] will return.
pub const MAX_PAGE_SIZE: u32 = 100;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS drugs (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    code        TEXT NOT NULL,
    genericName TEXT NOT NULL,
    brandName   TEXT NOT NULL,
    company     TEXT NOT NULL,
    launchDate  TEXT NOT NULL
);
";

const SELECT_COLUMNS: &str = "SELECT id, code, genericName, brandName, company, launchDate FROM drugs";

/// Persistent table of canonical drug records.
pub struct Store {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("path", &self.path).finish_non_exhaustive()
    }
}

impl Store {
    /// Open (creating if needed) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Self::initialize(&conn)?;
        tracing::debug!(path = %path.display(), "opened drug store");

        Ok(Self { conn: Mutex::new(conn), path: Some(path.to_path_buf()) })
    }

    /// Open a private in-memory database (tests, dry runs).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(&conn)?;
        Ok(Self { conn: Mutex::new(conn), path: None })
    }

    fn initialize(conn: &Connection) -> Result<()> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// Database file path, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::StorageLock)
    }

    /// Atomically replace every row with `records`, inserted in order with
    /// fresh ids starting at 1. Returns the number of rows inserted.
    ///
    /// On error the transaction is rolled back and the previous rows remain.
    pub fn replace_all(&self, records: &[DrugRecord]) -> Result<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM drugs", [])?;
        tx.execute("DELETE FROM sqlite_sequence WHERE name = 'drugs'", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO drugs (code, genericName, brandName, company, launchDate)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.code,
                    record.generic_name,
                    record.brand_name,
                    record.company,
                    record.launch_date,
                ])?;
            }
        }

        tx.commit()?;
        tracing::info!(rows = records.len(), "replaced drug table");
        Ok(records.len())
    }

    /// Distinct company names, ascending.
    pub fn list_companies(&self) -> Result<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT DISTINCT company FROM drugs ORDER BY company")?;
        let companies = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(companies)
    }

    /// One page of rows, newest launch date first, plus the total number of
    /// rows matching the filter.
    ///
    /// `company` filters by exact equality. `page` is raised to at least 1 and
    /// `page_size` clamped to `1..=MAX_PAGE_SIZE`.
    pub fn query(
        &self,
        company: Option<&str>,
        page: u32,
        page_size: u32,
    ) -> Result<(Vec<StoredDrug>, u64)> {
        let page = page.max(1);
        let limit = page_size.clamp(1, MAX_PAGE_SIZE);
        let offset = i64::from(page - 1) * i64::from(limit);

        let conn = self.lock()?;
        let total: i64 = conn.query_row(
            "SELECT COUNT(*) FROM drugs WHERE (?1 IS NULL OR company = ?1)",
            params![company],
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
            "{SELECT_COLUMNS}
             WHERE (?1 IS NULL OR company = ?1)
             ORDER BY launchDate DESC, id ASC
             LIMIT ?2 OFFSET ?3"
        ))?;
        let rows = stmt
            .query_map(params![company, limit, offset], stored_drug_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((rows, total as u64))
    }

    /// Total number of rows.
    pub fn count(&self) -> Result<u64> {
        let conn = self.lock()?;
        let total: i64 = conn.query_row("SELECT COUNT(*) FROM drugs", [], |row| row.get(0))?;
        Ok(total as u64)
    }

    /// Close the connection, reporting any error SQLite raises on close.
    pub fn close(self) -> Result<()> {
        let conn = self.conn.into_inner().map_err(|_| Error::StorageLock)?;
        conn.close().map_err(|(_, e)| Error::Storage(e))
    }
}

fn stored_drug_from_row(row: &Row<'_>) -> rusqlite::Result<StoredDrug> {
    Ok(StoredDrug {
        id: row.get(0)?,
        record: DrugRecord {
            code: row.get(1)?,
            generic_name: row.get(2)?,
            brand_name: row.get(3)?,
            company: row.get(4)?,
            launch_date: row.get(5)?,
        },
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
