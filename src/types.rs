/*!
 * Core types and data structures for the dotdump application
 */

use std::fmt;
use std::path::PathBuf;

use crate::utils::format_file_size;

/// Kind of filesystem entry seen during a walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Symbolic link (reported when the walker refuses to follow it)
    Symlink,
}

/// Why an included file has no content in the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// File size exceeds the configured limit
    TooLarge {
        /// Size reported by the filesystem
        size: u64,
        /// Configured limit
        limit: u64,
    },
    /// File content looks binary
    Binary,
    /// File could not be opened or read
    Unreadable(String),
}

impl SkipReason {
    /// Short tag used in directory trees
    pub fn tag(&self) -> &'static str {
        match self {
            SkipReason::TooLarge { .. } => "too large",
            SkipReason::Binary => "binary",
            SkipReason::Unreadable(_) => "unreadable",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooLarge { size, limit } => write!(
                f,
                "file too large ({} > limit {})",
                format_file_size(*size),
                format_file_size(*limit)
            ),
            SkipReason::Binary => write!(f, "binary file"),
            SkipReason::Unreadable(msg) => write!(f, "unreadable: {}", msg),
        }
    }
}

/// Why an entry was left out entirely
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExcludeReason {
    /// Matched an exclude pattern (default or user supplied)
    Pattern(String),
    /// No include rule of the active filter mode matched
    NoIncludeRule,
    /// Lives under a system path such as `/proc`
    SystemPath,
    /// Symlink whose target was already visited in this walk
    SymlinkCycle,
}

impl ExcludeReason {
    /// Whether this is one of the unconditional safety skips
    pub fn is_unsafe(&self) -> bool {
        matches!(self, ExcludeReason::SystemPath | ExcludeReason::SymlinkCycle)
    }
}

impl fmt::Display for ExcludeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExcludeReason::Pattern(p) => write!(f, "matches exclude pattern '{}'", p),
            ExcludeReason::NoIncludeRule => write!(f, "no include rule matched"),
            ExcludeReason::SystemPath => write!(f, "system path"),
            ExcludeReason::SymlinkCycle => write!(f, "symlink cycle"),
        }
    }
}

/// Final classification of a scanned entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Content is (or in a dry run would be) written to the report
    Included,
    /// Selected by the include rules but emitted without content
    Skipped(SkipReason),
    /// Not part of the report
    Excluded(ExcludeReason),
}

/// One filesystem object examined by the walker
#[derive(Debug, Clone)]
pub struct ScanEntry {
    /// Absolute path as walked
    pub abs_path: PathBuf,
    /// Path relative to the scan root, `/`-separated
    pub rel_path: String,
    /// Entry kind
    pub kind: EntryKind,
    /// Size in bytes (0 for directories)
    pub size: u64,
    /// Classification outcome
    pub disposition: Disposition,
}

impl ScanEntry {
    /// File name component of the relative path
    pub fn name(&self) -> &str {
        self.rel_path.rsplit('/').next().unwrap_or(&self.rel_path)
    }

    /// Whether this file gets its own section in text reports
    pub fn is_candidate(&self) -> bool {
        self.kind != EntryKind::Directory
            && matches!(
                self.disposition,
                Disposition::Included | Disposition::Skipped(_)
            )
    }

    /// Whether this directory was pruned from the walk
    pub fn is_pruned_dir(&self) -> bool {
        match &self.disposition {
            Disposition::Excluded(reason) => {
                self.kind != EntryKind::File && *reason != ExcludeReason::NoIncludeRule
            }
            _ => false,
        }
    }
}

/// Summary counters for one scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Directories descended into (root excluded)
    pub directories: usize,
    /// Directories not descended into
    pub pruned_dirs: usize,
    /// Files with disposition `Included`
    pub included: usize,
    /// Files skipped as binary
    pub skipped_binary: usize,
    /// Files skipped for size
    pub skipped_too_large: usize,
    /// Files that could not be read
    pub skipped_unreadable: usize,
    /// Files excluded by rules
    pub excluded: usize,
    /// Entries skipped as unsafe (system paths, symlink cycles)
    pub unsafe_skipped: usize,
    /// Errors reported by the directory walk itself
    pub walk_errors: usize,
    /// Sum of sizes of included files
    pub total_bytes: u64,
}

impl ScanStats {
    /// Account for one entry
    pub fn record(&mut self, entry: &ScanEntry) {
        match (&entry.disposition, entry.kind) {
            (Disposition::Included, EntryKind::Directory) => self.directories += 1,
            (Disposition::Included, _) => {
                self.included += 1;
                self.total_bytes += entry.size;
            }
            (Disposition::Skipped(reason), _) => match reason {
                SkipReason::TooLarge { .. } => self.skipped_too_large += 1,
                SkipReason::Binary => self.skipped_binary += 1,
                SkipReason::Unreadable(_) => self.skipped_unreadable += 1,
            },
            (Disposition::Excluded(reason), kind) => {
                if reason.is_unsafe() {
                    self.unsafe_skipped += 1;
                }
                if kind == EntryKind::File {
                    self.excluded += 1;
                } else {
                    self.pruned_dirs += 1;
                }
            }
        }
    }

    /// Files selected by the include rules, with or without content
    pub fn candidates(&self) -> usize {
        self.included + self.skipped_binary + self.skipped_too_large + self.skipped_unreadable
    }
}

/// Aggregate result of one walk
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Canonical scan root
    pub root: PathBuf,
    /// Every entry in walk order
    pub entries: Vec<ScanEntry>,
    /// Whether the root was the filesystem root
    pub scanned_filesystem_root: bool,
    /// Whether contents were deliberately left unread
    pub dry_run: bool,
    /// Summary counters
    pub stats: ScanStats,
}

impl ScanResult {
    /// Files that get a section in text reports, in walk order
    pub fn candidates(&self) -> impl Iterator<Item = &ScanEntry> {
        self.entries.iter().filter(|e| e.is_candidate())
    }

    /// Files whose content is written to the report, in walk order
    pub fn included(&self) -> impl Iterator<Item = &ScanEntry> {
        self.candidates()
            .filter(|e| e.disposition == Disposition::Included)
    }

    /// Display name of the root directory
    pub fn root_name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.root.display().to_string())
    }
}
