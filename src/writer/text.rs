/*!
 * Plain text report
 */

use std::io::Write;

use super::tree::render_tree;
use super::{FileBody, FormatWriter};
use crate::error::Result;
use crate::types::{ScanEntry, ScanResult};

const RULE: &str = "==================================================";

/// Plain text report: banner, directory tree, then one section per file
pub struct TextWriter<W: Write> {
    out: W,
}

impl<W: Write> TextWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> FormatWriter for TextWriter<W> {
    fn begin(&mut self, result: &ScanResult) -> Result<()> {
        writeln!(self.out, "{}", RULE)?;
        writeln!(self.out, "Path: {}", result.root.display())?;
        writeln!(self.out, "Hidden File Analysis")?;
        if result.dry_run {
            writeln!(self.out, "Dry run: contents not read")?;
        }
        writeln!(self.out, "{}", RULE)?;
        writeln!(self.out)?;

        writeln!(self.out, "DIRECTORY STRUCTURE")?;
        writeln!(self.out, "{}", RULE)?;
        writeln!(self.out, "{}", render_tree(result))?;
        writeln!(self.out)?;

        writeln!(self.out, "FILE CONTENTS")?;
        writeln!(self.out, "{}", RULE)?;
        Ok(())
    }

    fn write_file(&mut self, entry: &ScanEntry, body: &FileBody) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "==> {} <==", entry.rel_path)?;
        match body {
            FileBody::Text(text) => {
                self.out.write_all(text.as_bytes())?;
                if !text.is_empty() && !text.ends_with('\n') {
                    writeln!(self.out)?;
                }
            }
            FileBody::Skipped(reason) => writeln!(self.out, "[skipped: {}]", reason)?,
            FileBody::NotRead => {}
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
