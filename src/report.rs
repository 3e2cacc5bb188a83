/*!
 * Console summary for dotdump
 *
 * Renders the end-of-run tables with the tabled library. This is operator
 * output only; the report artifact itself is produced by the writers.
 */

use std::collections::HashMap;
use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::i18n::Lang;
use crate::types::ScanStats;
use crate::utils::format_file_size;

/// Information about a file in the report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
    /// Size on disk
    pub bytes: u64,
}

/// Everything shown at the end of a run
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Output file path
    pub output_file: String,
    /// Time taken to scan and write
    pub duration: Duration,
    /// Whether contents were read
    pub dry_run: bool,
    /// Walk counters
    pub stats: ScanStats,
    /// Total number of lines written
    pub total_lines: usize,
    /// Total number of characters written
    pub total_chars: usize,
    /// Included files that could no longer be read when writing
    pub read_failures: usize,
    /// Details for each reported file
    pub file_details: HashMap<String, FileReportInfo>,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for scan results
pub struct Reporter {
    format: ReportFormat,
    lang: Lang,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat, lang: Lang) -> Self {
        Self { format, lang }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string based on scan statistics
    pub fn generate_report(&self, report: &ScanReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ScanReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Keep the tail of long paths, cutting at a separator where possible
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.chars().count() <= max_len {
            return path.to_string();
        }

        let mut segments = Vec::new();
        let mut current_len = 3; // "..."
        for part in path.split('/').rev() {
            let part_len = part.chars().count() + 1;
            if current_len + part_len > max_len {
                break;
            }
            segments.push(part);
            current_len += part_len;
        }

        if segments.is_empty() {
            let tail: String = path
                .chars()
                .skip(path.chars().count() - (max_len - 3))
                .collect();
            return format!("...{}", tail);
        }

        segments.reverse();
        format!(".../{}", segments.join("/"))
    }

    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let labels = self.lang.summary_labels();
        let stats = &report.stats;
        let row = |key: &str, value: String| SummaryRow {
            key: key.to_string(),
            value,
        };

        // Files that vanished or became unreadable after the scan count as skipped
        let included = stats.included.saturating_sub(report.read_failures);
        let skipped = stats.candidates() - included;

        let mut rows = vec![
            row(labels.output_file, report.output_file.clone()),
            row(labels.duration, format!("{:.4?}", report.duration)),
            row(labels.included, self.format_number(included)),
            row(
                labels.skipped,
                format!(
                    "{} ({})",
                    self.format_number(skipped),
                    self.lang.skipped_breakdown(
                        stats.skipped_binary,
                        stats.skipped_too_large,
                        stats.skipped_unreadable + report.read_failures
                    )
                ),
            ),
            row(labels.excluded, self.format_number(stats.excluded)),
            row(labels.pruned, self.format_number(stats.pruned_dirs)),
        ];
        if stats.walk_errors > 0 {
            rows.push(row(labels.walk_errors, self.format_number(stats.walk_errors)));
        }
        if !report.dry_run {
            rows.push(row(labels.lines, self.format_number(report.total_lines)));
            rows.push(row(labels.chars, self.format_number(report.total_chars)));
        }
        rows.push(row(labels.size, format_file_size(stats.total_bytes)));

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Size")]
            size: String,
        }

        // Largest first, ties by path so the table is stable
        let mut files: Vec<_> = report.file_details.iter().collect();
        files.sort_by(|(pa, a), (pb, b)| b.bytes.cmp(&a.bytes).then_with(|| pa.cmp(pb)));

        let rows: Vec<FileRow> = files
            .iter()
            .take(10)
            .map(|(path, info)| FileRow {
                path: self.format_path(path, 60),
                lines: if report.dry_run {
                    "-".to_string()
                } else {
                    self.format_number(info.lines)
                },
                size: format_file_size(info.bytes),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &ScanReport) -> String {
        let summary_table = self.create_summary_table(report);
        let summary_title = self.lang.summary_title();

        let mut out = String::new();
        if !report.file_details.is_empty() {
            out.push_str(&format!(
                "{}\n{}\n\n",
                self.lang.files_title(),
                self.create_files_table(report)
            ));
        }
        if report.dry_run {
            out.push_str(self.lang.dry_run());
            out.push('\n');
        }
        out.push_str(&format!("{}\n{}", summary_title, summary_table));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ScanReport {
        let mut file_details = HashMap::new();
        file_details.insert(
            ".env".to_string(),
            FileReportInfo {
                lines: 2,
                chars: 20,
                bytes: 20,
            },
        );
        ScanReport {
            output_file: "hidden_dump.txt".to_string(),
            duration: Duration::from_millis(12),
            dry_run: false,
            stats: ScanStats {
                included: 1,
                skipped_binary: 1,
                total_bytes: 20,
                ..Default::default()
            },
            total_lines: 2,
            total_chars: 20,
            read_failures: 0,
            file_details,
        }
    }

    #[test]
    fn test_console_report_contents() {
        let text = Reporter::new(ReportFormat::ConsoleTable, Lang::En).generate_report(&report());
        assert!(text.contains("hidden_dump.txt"));
        assert!(text.contains(".env"));
        assert!(text.contains("1 binary, 0 too large, 0 unreadable"));
        assert!(!text.contains("DRY RUN"));
    }

    #[test]
    fn test_write_time_failures_count_as_skipped() {
        let mut report = report();
        report.stats.included = 3;
        report.read_failures = 1;
        report.stats.walk_errors = 2;
        let text = Reporter::new(ReportFormat::ConsoleTable, Lang::En).generate_report(&report);
        assert!(text.contains("1 binary, 0 too large, 1 unreadable"));
        assert!(text.contains("Walk Errors"));

        let line = |label: &str| {
            text.lines()
                .find(|l| l.contains(label))
                .map(String::from)
                .unwrap_or_default()
        };
        assert!(line("Files Included").contains(" 2 "));
        assert!(line("Files Skipped").contains(" 2 ("));
        assert!(line("Total Characters").contains(" 20 "));
    }

    #[test]
    fn test_dry_run_banner() {
        let mut report = report();
        report.dry_run = true;
        let text = Reporter::new(ReportFormat::ConsoleTable, Lang::En).generate_report(&report);
        assert!(text.contains("DRY RUN"));
    }

    #[test]
    fn test_format_path_keeps_tail() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable, Lang::En);
        assert_eq!(reporter.format_path("a/b.txt", 60), "a/b.txt");
        let long = format!("{}/config/.env", "deep".repeat(20));
        assert_eq!(reporter.format_path(&long, 20), ".../config/.env");
    }
}
