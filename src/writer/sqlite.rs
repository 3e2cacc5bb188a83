/*!
 * SQLite report: one row per file in a single `files` table
 */

use std::fs;
use std::path::Path;

use rusqlite::{params, Connection};

use super::{FileBody, FormatWriter};
use crate::error::{Result, ResultExt};
use crate::types::{ScanEntry, ScanResult};

const SCHEMA: &str = "
CREATE TABLE files (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    path TEXT NOT NULL,
    size INTEGER NOT NULL,
    content TEXT NOT NULL
);";

/// Writes included files as rows, all inside one transaction
pub struct SqliteWriter {
    conn: Connection,
}

impl SqliteWriter {
    /// Create a fresh database at `path`, replacing any existing file
    pub fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            fs::remove_file(path)
                .with_context(|| format!("cannot replace {}", path.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        Ok(Self { conn })
    }

    /// In-memory database, for tests and previews
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl FormatWriter for SqliteWriter {
    fn begin(&mut self, _result: &ScanResult) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    fn write_file(&mut self, entry: &ScanEntry, body: &FileBody) -> Result<()> {
        let content = match body {
            FileBody::Text(text) => text.as_str(),
            FileBody::NotRead => "",
            FileBody::Skipped(_) => return Ok(()),
        };
        let mut stmt = self
            .conn
            .prepare_cached("INSERT INTO files (path, size, content) VALUES (?1, ?2, ?3)")?;
        stmt.execute(params![entry.rel_path, entry.size as i64, content])?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::types::{Disposition, EntryKind, ScanStats, SkipReason};

    fn entry(rel: &str, size: u64) -> ScanEntry {
        ScanEntry {
            abs_path: PathBuf::from("/p").join(rel),
            rel_path: rel.to_string(),
            kind: EntryKind::File,
            size,
            disposition: Disposition::Included,
        }
    }

    fn empty() -> ScanResult {
        ScanResult {
            root: PathBuf::from("/p"),
            entries: vec![],
            scanned_filesystem_root: false,
            dry_run: false,
            stats: ScanStats::default(),
        }
    }

    fn rows(writer: &SqliteWriter) -> Vec<(String, i64, String)> {
        let mut stmt = writer
            .connection()
            .prepare("SELECT path, size, content FROM files ORDER BY id")
            .unwrap();
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
            .unwrap()
            .collect::<rusqlite::Result<Vec<_>>>()
            .unwrap();
        rows
    }

    #[test]
    fn test_rows_for_files_with_content() {
        let mut writer = SqliteWriter::in_memory().unwrap();
        writer.begin(&empty()).unwrap();
        writer
            .write_file(&entry(".env", 6), &FileBody::Text("A=1\nB\n".into()))
            .unwrap();
        writer
            .write_file(&entry("x.so", 10), &FileBody::Skipped(SkipReason::Binary))
            .unwrap();
        writer.write_file(&entry("dry.toml", 3), &FileBody::NotRead).unwrap();
        writer.finish().unwrap();

        assert_eq!(
            rows(&writer),
            vec![
                (".env".to_string(), 6, "A=1\nB\n".to_string()),
                ("dry.toml".to_string(), 3, String::new()),
            ]
        );
    }

    #[test]
    fn test_empty_database_has_table() {
        let mut writer = SqliteWriter::in_memory().unwrap();
        writer.begin(&empty()).unwrap();
        writer.finish().unwrap();
        assert!(rows(&writer).is_empty());
    }

    #[test]
    fn test_create_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.db");
        fs::write(&path, "not a database").unwrap();

        let mut writer = SqliteWriter::create(&path).unwrap();
        writer.begin(&empty()).unwrap();
        writer.finish().unwrap();
        assert!(rows(&writer).is_empty());
    }
}
