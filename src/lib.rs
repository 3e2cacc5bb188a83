/*!
 * dotdump - Dump the files code-sharing tools leave behind
 *
 * Walks a directory, classifies every entry against include and exclude
 * rules (dotfiles, configuration, lockfiles, logs, build artifacts), and
 * writes the selected files into a single txt, md, json or sqlite report.
 */

pub mod config;
pub mod error;
pub mod filters;
pub mod i18n;
pub mod reader;
pub mod report;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Config, FilterMode, OutputFormat};
pub use error::{DumpError, Result};
pub use filters::{FilterConfig, Verdict};
pub use reader::ContentReader;
pub use report::{FileReportInfo, ReportFormat, Reporter, ScanReport};
pub use scanner::{Scanner, Walk};
pub use types::{Disposition, EntryKind, ExcludeReason, ScanEntry, ScanResult, ScanStats, SkipReason};
pub use utils::{format_file_size, parse_size};
pub use writer::{FormatWriter, ReportWriter, WriteStats};
