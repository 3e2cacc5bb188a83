/*!
 * Configuration handling for dotdump
 */

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use strum::Display;

use crate::error::Result;
use crate::filters::FilterConfig;
use crate::i18n::Lang;
use crate::utils::parse_size;
use crate::{bail, ensure};

/// Default size limit for file contents (100 MiB)
pub const DEFAULT_MAX_SIZE: u64 = 100 * 1024 * 1024;

/// Base name of the report written into the scan root
pub const DEFAULT_OUTPUT_STEM: &str = "hidden_dump";

/// Report encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, Default)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text with a directory tree and file sections
    #[default]
    Txt,
    /// Markdown with fenced code blocks
    Md,
    /// JSON object mapping relative path to content
    Json,
    /// SQLite database with one row per file
    Sqlite,
}

impl OutputFormat {
    /// File extension of the default output file
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Md => "md",
            OutputFormat::Json => "json",
            OutputFormat::Sqlite => "db",
        }
    }
}

/// Which include rules are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, Default)]
#[strum(serialize_all = "lowercase")]
pub enum FilterMode {
    /// Every include rule
    #[default]
    All,
    /// Only files with a dot-prefixed path component
    Dotfiles,
    /// Only configuration files
    Config,
}

fn parse_max_size(input: &str) -> std::result::Result<u64, String> {
    parse_size(input).map_err(|e| e.to_string())
}

/// Command-line arguments for dotdump
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "dotdump",
    version = env!("CARGO_PKG_VERSION"),
    about = "Dump hidden files, configs, lockfiles and build leftovers into one report",
    long_about = "Walks a directory, picks the files code-sharing tools usually leave out (dotfiles, configuration, lockfiles, logs, build artifacts) and writes their tree and contents into a single txt, md, json or sqlite report."
)]
pub struct Args {
    /// Directory to scan
    #[clap(default_value = ".")]
    pub path: String,

    /// Additional exclude pattern, added to the defaults (repeatable)
    #[clap(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Report format
    #[clap(long, value_enum, default_value_t = OutputFormat::default())]
    pub format: OutputFormat,

    /// Which include rules to apply
    #[clap(long, value_enum, default_value_t = FilterMode::default())]
    pub filter: FilterMode,

    /// Largest file whose content is included (e.g. 50M, 100K, 4096)
    #[clap(long, value_parser = parse_max_size, default_value = "100M")]
    pub max_size: u64,

    /// Classify and list files without reading their contents
    #[clap(long)]
    pub dry_run: bool,

    /// Language of operator messages
    #[clap(long, value_enum, default_value_t = Lang::default())]
    pub lang: Lang,

    /// Report file (default: <path>/hidden_dump.<ext>)
    #[clap(short, long)]
    pub output: Option<String>,

    /// Do not ask for confirmation when scanning the filesystem root
    #[clap(short = 'y', long)]
    pub yes: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[clap(short, long)]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to scan, as given
    pub target_dir: PathBuf,

    /// Report file path
    pub output_file: PathBuf,

    /// Resolved include/exclude rules
    pub filter: FilterConfig,

    /// Report format
    pub format: OutputFormat,

    /// Skip reading contents
    pub dry_run: bool,

    /// Language of operator messages
    pub lang: Lang,

    /// Skip the filesystem root confirmation
    pub assume_yes: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let target_dir = PathBuf::from(&args.path);
        let output_file = match args.output {
            Some(output) => PathBuf::from(output),
            None => default_output_path(&target_dir, args.format),
        };

        Self {
            filter: FilterConfig::new(args.filter, &args.exclude, args.max_size),
            target_dir,
            output_file,
            format: args.format,
            dry_run: args.dry_run,
            lang: args.lang,
            assume_yes: args.yes,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.target_dir.exists() {
            bail!(PathNotFound, "{}", self.target_dir.display());
        }
        ensure!(
            self.target_dir.is_dir(),
            NotADirectory,
            "{}",
            self.target_dir.display()
        );

        // Check if output file directory exists
        if let Some(parent) = self.output_file.parent() {
            if !parent.exists() && parent != Path::new("") {
                bail!(
                    Writer,
                    "output directory not found: {}",
                    parent.display()
                );
            }
        }
        ensure!(
            !self.output_file.is_dir(),
            Writer,
            "output path is a directory: {}",
            self.output_file.display()
        );

        Ok(())
    }

    /// Absolute form of the output path, used to keep the report out of the scan
    pub fn absolute_output_file(&self) -> Result<PathBuf> {
        let output = if self.output_file.is_absolute() {
            self.output_file.clone()
        } else {
            env::current_dir()?.join(&self.output_file)
        };

        let Some(name) = output.file_name() else {
            bail!(Config, "output path has no file name: {}", output.display());
        };
        let parent = output.parent().unwrap_or_else(|| Path::new("/"));

        Ok(match fs::canonicalize(parent) {
            Ok(parent) => parent.join(name),
            Err(_) => output.clone(),
        })
    }
}

/// `<root>/hidden_dump.<ext>`
pub fn default_output_path(root: &Path, format: OutputFormat) -> PathBuf {
    root.join(format!("{}.{}", DEFAULT_OUTPUT_STEM, format.extension()))
}
