/// SQLite-backed media catalog.
///
/// Reads a `media` table shaped like a platform media store:
///
/// ```text
/// media(id INTEGER PRIMARY KEY, display_name TEXT, media_type TEXT,
///       duration_ms INTEGER, date_added INTEGER)
/// ```
///
/// Any failure to open or query the database is reported as
/// [`ScanError::IndexUnavailable`].
use super::indexed::{MediaIndex, MediaKind, MediaRecord, MediaRow, SortOrder, VideoQuery};
use crate::error::ScanError;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;
use tracing::{debug, info};

pub struct SqliteMediaIndex {
    conn: Mutex<Connection>,
}

impl SqliteMediaIndex {
    /// Open an existing catalog read-only.
    pub fn open(path: &Path) -> Result<Self, ScanError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        info!("Media index opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open or create a writable catalog and make sure the schema exists.
    pub fn create(path: &Path) -> Result<Self, ScanError> {
        let conn = Connection::open(path)?;
        let index = Self {
            conn: Mutex::new(conn),
        };
        index.create_schema()?;
        Ok(index)
    }

    /// Empty catalog in memory.
    pub fn open_in_memory() -> Result<Self, ScanError> {
        let index = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        };
        index.create_schema()?;
        Ok(index)
    }

    fn create_schema(&self) -> Result<(), ScanError> {
        let conn = self.conn.lock();
        conn.execute(
            "CREATE TABLE IF NOT EXISTS media (
                id              INTEGER PRIMARY KEY,
                display_name    TEXT NOT NULL,
                media_type      TEXT NOT NULL,
                duration_ms     INTEGER NOT NULL DEFAULT 0,
                date_added      INTEGER NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_media_date_added
             ON media(date_added DESC)",
            [],
        )?;
        Ok(())
    }

    /// Add or replace a record.
    pub fn insert(&self, record: &MediaRecord) -> Result<(), ScanError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR REPLACE INTO media (id, display_name, media_type, duration_ms, date_added)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.id,
                record.display_name,
                record.kind.as_str(),
                clamp_i64(record.duration_ms),
                record.date_added
            ],
        )?;
        Ok(())
    }
}

impl MediaIndex for SqliteMediaIndex {
    fn query_videos(&self, query: &VideoQuery) -> Result<Vec<MediaRow>, ScanError> {
        let order_by = match query.order {
            SortOrder::DateAddedDesc => "date_added DESC, id DESC",
        };
        let sql = format!(
            "SELECT id, display_name FROM media
             WHERE media_type = ?1 AND duration_ms >= ?2
             ORDER BY {order_by}"
        );

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(
                params![MediaKind::Video.as_str(), clamp_i64(query.min_duration_ms)],
                |row| {
                    Ok(MediaRow {
                        id: row.get(0)?,
                        display_name: row.get(1)?,
                    })
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Index query matched {} rows", rows.len());
        Ok(rows)
    }
}

fn clamp_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
