/*!
 * Directory walking and entry classification
 */

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::{DumpError, Result};
use crate::filters::{is_unsafe_path, FilterConfig, Verdict};
use crate::reader::ContentReader;
use crate::types::{
    Disposition, EntryKind, ExcludeReason, ScanEntry, ScanResult, ScanStats, SkipReason,
};
use crate::utils::{is_filesystem_root, to_slash_path};

/// Scanner for directory contents
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Start a lazy walk of the target directory.
    ///
    /// Fails only when the root itself is missing, not a directory, or
    /// cannot be listed.
    pub fn walk(&self) -> Result<Walk<'_>> {
        let root = fs::canonicalize(&self.config.target_dir).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                DumpError::PathNotFound(self.config.target_dir.display().to_string())
            }
            _ => DumpError::Io(e),
        })?;
        if !root.is_dir() {
            return Err(DumpError::NotADirectory(root.display().to_string()));
        }
        // Surface an unreadable root as fatal instead of a walk warning
        fs::read_dir(&root)?;

        if is_filesystem_root(&root) {
            warn!("scanning the filesystem root; this may take a very long time");
        }

        // Dry runs still sniff for binaries so both modes agree on dispositions
        let reader = ContentReader::new(self.config.filter.max_file_size);
        let output_file = self.config.absolute_output_file().ok();

        Ok(Walk::new(&self.config.filter, reader, root, output_file))
    }

    /// Walk the whole tree and collect every entry
    pub fn scan(&self) -> Result<ScanResult> {
        let mut walk = self.walk()?;
        let mut entries = Vec::new();
        let mut stats = ScanStats::default();

        for entry in walk.by_ref() {
            self.progress.inc(1);
            self.progress
                .set_message(self.config.lang.current_entry(&display_name(&entry.rel_path)));

            stats.record(&entry);
            entries.push(entry);
        }
        stats.walk_errors = walk.walk_errors();

        info!(
            included = stats.included,
            skipped = stats.candidates() - stats.included,
            excluded = stats.excluded,
            pruned = stats.pruned_dirs,
            "scan finished"
        );

        Ok(ScanResult {
            scanned_filesystem_root: is_filesystem_root(walk.root()),
            root: walk.root().to_path_buf(),
            entries,
            dry_run: self.config.dry_run,
            stats,
        })
    }
}

/// Lazy, depth-first, name-sorted sequence of classified entries.
///
/// Excluded and unsafe directories are yielded once and never descended
/// into. Symlinks are followed unless their target was already visited.
pub struct Walk<'a> {
    filter: &'a FilterConfig,
    reader: ContentReader,
    root: PathBuf,
    output_file: Option<PathBuf>,
    inner: walkdir::IntoIter,
    /// Canonical directories and symlink targets seen so far
    visited: HashSet<PathBuf>,
    walk_errors: usize,
    done: bool,
}

impl<'a> Walk<'a> {
    fn new(
        filter: &'a FilterConfig,
        reader: ContentReader,
        root: PathBuf,
        output_file: Option<PathBuf>,
    ) -> Self {
        let inner = WalkDir::new(&root)
            .follow_links(true)
            .min_depth(1)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()))
            .into_iter();

        let done = is_unsafe_path(&root);
        if done {
            warn!(root = %root.display(), "refusing to scan a system path");
        }

        let mut visited = HashSet::new();
        visited.insert(root.clone());

        Self {
            filter,
            reader,
            root,
            output_file,
            inner,
            visited,
            walk_errors: 0,
            done,
        }
    }

    /// Canonical scan root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Non-fatal errors reported by the directory walk so far
    pub fn walk_errors(&self) -> usize {
        self.walk_errors
    }

    fn visit(&mut self, dent: DirEntry) -> Option<ScanEntry> {
        let abs_path = dent.path().to_path_buf();
        if self.output_file.as_deref() == Some(abs_path.as_path()) {
            return None;
        }

        let rel_path = to_slash_path(abs_path.strip_prefix(&self.root).unwrap_or(abs_path.as_path()));
        let file_type = dent.file_type();
        let is_dir = file_type.is_dir();
        let kind = if is_dir {
            EntryKind::Directory
        } else {
            EntryKind::File
        };

        let is_link = dent.path_is_symlink();
        let verdict = if is_link && self.links_into_system_path(&abs_path) {
            Verdict::SkipUnsafe
        } else {
            self.filter.classify(&abs_path, &rel_path, is_dir)
        };
        let mut disposition = match verdict {
            Verdict::SkipUnsafe => {
                warn!(path = %rel_path, "system path, not following");
                Disposition::Excluded(ExcludeReason::SystemPath)
            }
            Verdict::Exclude(reason) => Disposition::Excluded(reason),
            Verdict::Include => Disposition::Included,
        };

        if disposition == Disposition::Included && (is_dir || is_link) {
            let seen = self.already_visited(&abs_path);
            if seen && is_link {
                warn!(path = %rel_path, "symlink target already visited, not following");
                disposition = Disposition::Excluded(ExcludeReason::SymlinkCycle);
            }
        }

        if is_dir && disposition != Disposition::Included {
            self.inner.skip_current_dir();
        }

        let mut size = 0;
        if !is_dir && disposition == Disposition::Included {
            match dent.metadata() {
                Ok(meta) if meta.is_file() => {
                    size = meta.len();
                    if let Some(reason) = self.reader.probe(&abs_path, size) {
                        disposition = Disposition::Skipped(reason);
                    }
                }
                Ok(_) => {
                    disposition =
                        Disposition::Skipped(SkipReason::Unreadable("not a regular file".into()))
                }
                Err(e) => disposition = Disposition::Skipped(SkipReason::Unreadable(e.to_string())),
            }
        }

        match &disposition {
            Disposition::Skipped(reason) => info!(path = %rel_path, %reason, "skipping"),
            other => debug!(path = %rel_path, disposition = ?other, "classified"),
        }

        Some(ScanEntry {
            abs_path,
            rel_path,
            kind,
            size,
            disposition,
        })
    }

    /// Record the canonical target of `path`; true if it was seen before.
    /// Real directories are recorded too so later links to them are caught.
    fn already_visited(&mut self, path: &Path) -> bool {
        match fs::canonicalize(path) {
            Ok(canonical) => !self.visited.insert(canonical),
            Err(_) => false,
        }
    }

    /// A link whose target resolves under `/proc`, `/sys` or `/dev`
    fn links_into_system_path(&self, link: &Path) -> bool {
        fs::canonicalize(link)
            .map(|target| is_unsafe_path(&target))
            .unwrap_or(false)
    }

    /// A link whose target is gone becomes an unreadable candidate rather
    /// than a walk error, if the rules would have included it
    fn dangling_link(&self, path: &Path) -> Option<ScanEntry> {
        let is_link = fs::symlink_metadata(path)
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false);
        if !is_link || fs::metadata(path).is_ok() {
            return None;
        }

        let rel_path = to_slash_path(path.strip_prefix(&self.root).unwrap_or(path));
        let disposition = match self.filter.classify(path, &rel_path, false) {
            Verdict::SkipUnsafe => Disposition::Excluded(ExcludeReason::SystemPath),
            Verdict::Exclude(reason) => Disposition::Excluded(reason),
            Verdict::Include => {
                info!(path = %rel_path, "skipping dangling symlink");
                Disposition::Skipped(SkipReason::Unreadable("dangling symlink".into()))
            }
        };

        Some(ScanEntry {
            abs_path: path.to_path_buf(),
            rel_path,
            kind: EntryKind::File,
            size: 0,
            disposition,
        })
    }

    fn handle_error(&mut self, err: walkdir::Error) -> Option<ScanEntry> {
        if err.loop_ancestor().is_some() {
            let abs_path = err.path()?.to_path_buf();
            let rel_path = to_slash_path(abs_path.strip_prefix(&self.root).unwrap_or(abs_path.as_path()));
            warn!(path = %rel_path, "symlink loops back to an ancestor, not following");
            return Some(ScanEntry {
                abs_path,
                rel_path,
                kind: EntryKind::Symlink,
                size: 0,
                disposition: Disposition::Excluded(ExcludeReason::SymlinkCycle),
            });
        }

        if let Some(entry) = err.path().and_then(|path| self.dangling_link(path)) {
            return Some(entry);
        }

        self.walk_errors += 1;
        match err.path() {
            Some(path) => warn!(path = %path.display(), error = %err, "walk error"),
            None => warn!(error = %err, "walk error"),
        }
        None
    }
}

impl Iterator for Walk<'_> {
    type Item = ScanEntry;

    fn next(&mut self) -> Option<ScanEntry> {
        while !self.done {
            let produced = match self.inner.next() {
                Some(Ok(dent)) => self.visit(dent),
                Some(Err(err)) => self.handle_error(err),
                None => {
                    self.done = true;
                    None
                }
            };
            if produced.is_some() {
                return produced;
            }
        }
        None
    }
}

/// Shorten long paths for the progress line
fn display_name(path: &str) -> String {
    let len = path.chars().count();
    if len > 40 {
        format!("...{}", path.chars().skip(len - 37).collect::<String>())
    } else {
        path.to_string()
    }
}
