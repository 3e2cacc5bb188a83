/*!
 * JSON report: an object mapping relative path to file content
 */

use std::io::Write;

use super::{FileBody, FormatWriter};
use crate::error::Result;
use crate::types::{ScanEntry, ScanResult};

/// Streams `{"path": "content", ...}` one member at a time.
///
/// Only files with content appear; skipped files and directories do not.
/// In a dry run included files map to an empty string.
pub struct JsonWriter<W: Write> {
    out: W,
    members: usize,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, members: 0 }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn member(&mut self, key: &str, value: &str) -> Result<()> {
        let sep = if self.members == 0 { "\n" } else { ",\n" };
        self.out.write_all(sep.as_bytes())?;
        self.out.write_all(b"  ")?;
        serde_json::to_writer(&mut self.out, key)?;
        self.out.write_all(b": ")?;
        serde_json::to_writer(&mut self.out, value)?;
        self.members += 1;
        Ok(())
    }
}

impl<W: Write> FormatWriter for JsonWriter<W> {
    fn begin(&mut self, _result: &ScanResult) -> Result<()> {
        self.out.write_all(b"{")?;
        Ok(())
    }

    fn write_file(&mut self, entry: &ScanEntry, body: &FileBody) -> Result<()> {
        match body {
            FileBody::Text(text) => self.member(&entry.rel_path, text),
            FileBody::NotRead => self.member(&entry.rel_path, ""),
            FileBody::Skipped(_) => Ok(()),
        }
    }

    fn finish(&mut self) -> Result<()> {
        if self.members > 0 {
            self.out.write_all(b"\n")?;
        }
        self.out.write_all(b"}\n")?;
        self.out.flush()?;
        Ok(())
    }
}
