/*!
 * Command-line interface for dotdump
 */

use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use dotdump::config::{Args, Config};
use dotdump::error::{DumpError, Result};
use dotdump::i18n::Lang;
use dotdump::report::{ReportFormat, Reporter, ScanReport};
use dotdump::scanner::Scanner;
use dotdump::utils::is_filesystem_root;
use dotdump::writer::ReportWriter;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "dotdump", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    setup_logging(args.verbose, args.quiet);
    let quiet = args.quiet;

    // Create configuration
    let config = Config::from_args(args);
    let lang = config.lang;

    match run(config, quiet) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = match &e {
                DumpError::PathNotFound(path) => lang.not_found(path),
                other => lang.error(&other.to_string()),
            };
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config, quiet: bool) -> Result<()> {
    let lang = config.lang;

    // Validate configuration
    config.validate()?;

    let root = fs::canonicalize(&config.target_dir)?;
    if is_filesystem_root(&root) && !config.assume_yes && !confirm_root_scan(lang)? {
        println!("{}", lang.cancelled());
        return Ok(());
    }

    if !quiet {
        println!("{}", lang.app_title());
        println!("{}", "=".repeat(50));
        println!("{}", lang.analyzing(&root.display().to_string()));
    }

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos} ⏱️  {elapsed_precise}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("📂 Scanning");
    progress.set_message(lang.scanning());

    let progress = Arc::new(progress);
    let scanner = Scanner::new(config.clone(), Arc::clone(&progress));
    let writer = ReportWriter::new(config.clone(), Arc::clone(&progress));

    // Start timing both scan and write operations
    let start_time = Instant::now();

    let result = scanner.scan()?;

    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%)")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress.set_prefix("📄 Writing");
    progress.set_message(lang.writing());
    progress.set_position(0);
    progress.set_length(result.stats.candidates() as u64);

    let write_stats = writer.write(&result)?;

    let duration = start_time.elapsed();
    progress.finish_and_clear();

    if !quiet {
        println!("{}", lang.success(&config.output_file.display().to_string()));

        let scan_report = ScanReport {
            output_file: config.output_file.display().to_string(),
            duration,
            dry_run: config.dry_run,
            stats: result.stats,
            total_lines: write_stats.total_lines,
            total_chars: write_stats.total_chars,
            read_failures: write_stats.read_failures,
            file_details: write_stats.file_details,
        };
        Reporter::new(ReportFormat::ConsoleTable, lang).print_report(&scan_report);
    }

    Ok(())
}

/// Ask before walking `/`. Non-interactive runs proceed after the warning.
fn confirm_root_scan(lang: Lang) -> Result<bool> {
    eprintln!("{}", lang.root_warning());

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        eprint!("{}", lang.confirm());
        io::stderr().flush()?;
    }
    read_confirmation(interactive, &mut stdin.lock())
}

/// Non-interactive input always proceeds; otherwise only `y` or `yes` does
fn read_confirmation(interactive: bool, input: &mut impl BufRead) -> Result<bool> {
    if !interactive {
        return Ok(true);
    }

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match (quiet, verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "info",
            (false, 2) => "debug",
            (false, _) => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
