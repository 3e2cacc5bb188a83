/*!
 * Report writers for dotdump
 *
 * The scan result only carries metadata. File contents are read here, one
 * file at a time, and handed straight to the format sink.
 */

pub mod json;
pub mod markdown;
pub mod sqlite;
pub mod text;
pub mod tree;

use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use crate::config::{Config, OutputFormat};
use crate::error::{Result, ResultExt};
use crate::reader::ContentReader;
use crate::report::FileReportInfo;
use crate::types::{Disposition, ScanEntry, ScanResult, SkipReason};

pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use sqlite::SqliteWriter;
pub use text::TextWriter;

/// What a sink receives for one candidate file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileBody {
    /// Decoded file content
    Text(String),
    /// No content, with the reason
    Skipped(SkipReason),
    /// Dry run: content deliberately not read
    NotRead,
}

/// One output encoding
pub trait FormatWriter {
    /// Called once before any file, with the complete scan result
    fn begin(&mut self, result: &ScanResult) -> Result<()>;

    /// Called for every candidate file in walk order
    fn write_file(&mut self, entry: &ScanEntry, body: &FileBody) -> Result<()>;

    /// Flush and close the artifact
    fn finish(&mut self) -> Result<()>;
}

/// What the writer produced
#[derive(Debug, Clone, Default)]
pub struct WriteStats {
    /// Files whose content made it into the report
    pub files_written: usize,
    /// Total number of lines written
    pub total_lines: usize,
    /// Total number of characters written
    pub total_chars: usize,
    /// Files that could no longer be read at write time
    pub read_failures: usize,
    /// Per-file details, keyed by relative path
    pub file_details: HashMap<String, FileReportInfo>,
}

/// Writes a scan result in the configured format
pub struct ReportWriter {
    /// Writer configuration
    config: Config,
    /// Progress bar
    progress: Arc<ProgressBar>,
}

impl ReportWriter {
    /// Create a new report writer
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Write the report to the configured output file
    pub fn write(&self, result: &ScanResult) -> Result<WriteStats> {
        let path = &self.config.output_file;
        info!(path = %path.display(), format = %self.config.format, "writing report");

        let mut sink: Box<dyn FormatWriter> = match self.config.format {
            OutputFormat::Sqlite => Box::new(SqliteWriter::create(path)?),
            format => {
                let file = File::create(path)
                    .with_context(|| format!("cannot create {}", path.display()))?;
                let out = BufWriter::new(file);
                match format {
                    OutputFormat::Md => Box::new(MarkdownWriter::new(out)),
                    OutputFormat::Json => Box::new(JsonWriter::new(out)),
                    _ => Box::new(TextWriter::new(out)),
                }
            }
        };

        self.render(result, sink.as_mut())
    }

    /// Drive `sink` over every candidate file of `result`
    pub fn render(&self, result: &ScanResult, sink: &mut dyn FormatWriter) -> Result<WriteStats> {
        let reader = ContentReader::new(self.config.filter.max_file_size);
        let mut stats = WriteStats::default();

        sink.begin(result)?;

        for entry in result.candidates() {
            let body = match &entry.disposition {
                Disposition::Skipped(reason) => FileBody::Skipped(reason.clone()),
                Disposition::Included if result.dry_run => FileBody::NotRead,
                Disposition::Included => match reader.read(&entry.abs_path) {
                    Ok(text) => FileBody::Text(text),
                    Err(reason) => {
                        warn!(path = %entry.rel_path, %reason, "file changed since scan");
                        stats.read_failures += 1;
                        FileBody::Skipped(reason)
                    }
                },
                Disposition::Excluded(_) => continue,
            };

            let info = match &body {
                FileBody::Text(text) => {
                    let lines = text.lines().count();
                    let chars = text.chars().count();
                    stats.files_written += 1;
                    stats.total_lines += lines;
                    stats.total_chars += chars;
                    Some(FileReportInfo {
                        lines,
                        chars,
                        bytes: entry.size,
                    })
                }
                FileBody::NotRead => Some(FileReportInfo {
                    bytes: entry.size,
                    ..Default::default()
                }),
                FileBody::Skipped(_) => None,
            };
            if let Some(info) = info {
                stats.file_details.insert(entry.rel_path.clone(), info);
            }

            debug!(path = %entry.rel_path, "written");
            sink.write_file(entry, &body)?;
            self.progress.inc(1);
        }

        sink.finish()?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sink recording calls, to test the driver without any encoding
    #[derive(Default)]
    struct Recorder {
        began: bool,
        finished: bool,
        files: Vec<(String, FileBody)>,
    }

    impl FormatWriter for Recorder {
        fn begin(&mut self, _result: &ScanResult) -> Result<()> {
            self.began = true;
            Ok(())
        }

        fn write_file(&mut self, entry: &ScanEntry, body: &FileBody) -> Result<()> {
            self.files.push((entry.rel_path.clone(), body.clone()));
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn test_render_empty_result() {
        let config = crate::tests::config_for(std::path::Path::new("."));
        let writer = ReportWriter::new(config, Arc::new(ProgressBar::hidden()));
        let result = crate::tests::empty_result();

        let mut sink = Recorder::default();
        let stats = writer.render(&result, &mut sink).unwrap();

        assert!(sink.began && sink.finished);
        assert!(sink.files.is_empty());
        assert_eq!(stats.files_written, 0);
    }
}
