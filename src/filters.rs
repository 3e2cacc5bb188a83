/*!
 * Path classification: which entries are interesting, which are pruned
 */

use std::path::Path;

use glob_match::glob_match;

use crate::config::FilterMode;
use crate::types::ExcludeReason;

/// System paths that are never scanned, whatever the filters say
pub const UNSAFE_PATHS: &[&str] = &["/proc", "/sys", "/dev"];

/// Large or noisy directories excluded on every run
pub const DEFAULT_EXCLUDE: &[&str] = &[
    "node_modules",
    ".git",
    "__pycache__",
    "venv",
    ".venv",
    ".cache",
    "build",
    "dist",
    "target",
];

/// Directories whose files are interesting even without a dot in their name
pub const INCLUDE_DIRS: &[&str] = &[
    // Build output
    "out",
    "bin",
    "obj",
    "generated",
    // Framework build folders
    ".next",
    ".nuxt",
    ".angular",
    ".expo",
    // Logs
    "logs",
    "log",
    // Temp
    "temp",
    "tmp",
    ".tmp",
    // Editor settings
    ".vscode",
    ".idea",
    ".vs",
    // Version control metadata
    ".svn",
    ".hg",
    // Environments
    "env",
    ".env",
    // CI/CD
    ".github",
    ".gitlab",
    ".circleci",
    // Docker
    ".docker",
    "docker",
    // Databases
    "db",
    "database",
    "sqlite",
    // Coverage reports
    "coverage",
];

/// Configuration file patterns, the only ones used in `config` mode
pub const CONFIG_PATTERNS: &[&str] = &[
    ".env", ".env.*", "*.env", "*.env.*", "*.ini", "*.toml", "*.yaml", "*.yml", "*.json", "*.xml",
];

/// Remaining file patterns applied in `all` mode
pub const FILE_PATTERNS: &[&str] = &[
    // Logs
    "*.log",
    "*.log.*",
    "*.out",
    // Configuration
    "*.conf",
    "*.theme",
    ".gitignore",
    ".gitconfig",
    ".editorconfig",
    // Lockfiles
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "composer.lock",
    "poetry.lock",
    "Cargo.lock",
    // Build artifacts
    "*.pyc",
    "*.pyo",
    "*.pyd",
    "*.class",
    "*.o",
    "*.so",
    "*.dll",
    "*.exe",
    "*.dylib",
    "*.a",
    // OS droppings
    ".DS_Store",
    "Thumbs.db",
    "desktop.ini",
    // Backups and swap files
    "*.bak",
    "*.swp",
    "*.swo",
    // Coverage
    ".coverage",
    // Shell and tool rc files
    ".bashrc",
    ".zshrc",
    ".profile",
    ".vimrc",
    ".eslintrc",
    ".prettierrc",
];

/// Classifier verdict for one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Interesting: files are reported, directories are descended into
    Include,
    /// Left out; directories are pruned
    Exclude(ExcludeReason),
    /// System path, never touched
    SkipUnsafe,
}

/// Resolved include/exclude rules for one run
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Active filter mode
    pub mode: FilterMode,
    /// Whether the dotfile rule applies
    pub dotfiles: bool,
    /// File name patterns that select a file
    pub file_patterns: Vec<String>,
    /// Directory names whose descendants are selected
    pub dir_patterns: Vec<String>,
    /// Exclude patterns, defaults first then user supplied
    pub exclude_patterns: Vec<String>,
    /// Maximum size of a file whose content is read
    pub max_file_size: u64,
}

impl FilterConfig {
    /// Build the rule set for `mode`, adding `extra_excludes` to the defaults
    pub fn new(mode: FilterMode, extra_excludes: &[String], max_file_size: u64) -> Self {
        let owned = |list: &[&str]| list.iter().map(|p| p.to_string()).collect::<Vec<_>>();

        let (dotfiles, file_patterns, dir_patterns) = match mode {
            FilterMode::Dotfiles => (true, Vec::new(), Vec::new()),
            FilterMode::Config => (false, owned(CONFIG_PATTERNS), Vec::new()),
            FilterMode::All => {
                let mut files = owned(CONFIG_PATTERNS);
                files.extend(owned(FILE_PATTERNS));
                (true, files, owned(INCLUDE_DIRS))
            }
        };

        let mut exclude_patterns = owned(DEFAULT_EXCLUDE);
        for pattern in extra_excludes {
            if !exclude_patterns.contains(pattern) {
                exclude_patterns.push(pattern.clone());
            }
        }

        Self {
            mode,
            dotfiles,
            file_patterns,
            dir_patterns,
            exclude_patterns,
            max_file_size,
        }
    }

    /// Classify an entry.
    ///
    /// `abs_path` is used for the system path guard, `rel_path` is the
    /// `/`-separated path below the scan root.
    pub fn classify(&self, abs_path: &Path, rel_path: &str, is_dir: bool) -> Verdict {
        if is_unsafe_path(abs_path) {
            return Verdict::SkipUnsafe;
        }

        if let Some(pattern) = self.matching_exclude(rel_path) {
            return Verdict::Exclude(ExcludeReason::Pattern(pattern.to_string()));
        }

        if is_dir || self.matches_include(rel_path) {
            Verdict::Include
        } else {
            Verdict::Exclude(ExcludeReason::NoIncludeRule)
        }
    }

    /// First exclude pattern matching the entry name or its relative path
    pub fn matching_exclude(&self, rel_path: &str) -> Option<&str> {
        let name = file_name(rel_path);
        self.exclude_patterns
            .iter()
            .find(|p| glob_match(p, name) || glob_match(p, rel_path))
            .map(String::as_str)
    }

    /// Whether any include rule of the active mode selects this file
    pub fn matches_include(&self, rel_path: &str) -> bool {
        let mut components = rel_path.split('/').collect::<Vec<_>>();
        let name = components.pop().unwrap_or_default();

        if self.dotfiles && (name.starts_with('.') || components.iter().any(|c| c.starts_with('.')))
        {
            return true;
        }

        if self.file_patterns.iter().any(|p| glob_match(p, name)) {
            return true;
        }

        components
            .iter()
            .any(|dir| self.dir_patterns.iter().any(|p| glob_match(p, dir)))
    }
}

/// Whether a path lives under one of the [`UNSAFE_PATHS`]
pub fn is_unsafe_path(path: &Path) -> bool {
    UNSAFE_PATHS.iter().any(|p| path.starts_with(p))
}

fn file_name(rel_path: &str) -> &str {
    rel_path.rsplit('/').next().unwrap_or(rel_path)
}
