/*!
 * Utility functions for dotdump
 */

use std::path::{Component, Path};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::{bail, error};

static SIZE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(\d+)\s*([kmg])?(?:i?b)?\s*$").unwrap());

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Parse a size such as `50M`, `100k`, `1GiB` or `4096` into bytes.
///
/// Units are binary (`K` = 1024) and case-insensitive.
pub fn parse_size(input: &str) -> Result<u64> {
    let caps = SIZE_REGEX
        .captures(input)
        .ok_or_else(|| error!(InvalidArgument, "invalid size '{}' (expected e.g. 50M, 100K, 4096)", input))?;

    let value: u64 = caps[1]
        .parse()
        .map_err(|_| error!(InvalidArgument, "size '{}' is out of range", input))?;

    let multiplier: u64 = match caps.get(2).map(|m| m.as_str().to_ascii_uppercase()) {
        Some(unit) if unit == "K" => 1024,
        Some(unit) if unit == "M" => 1024 * 1024,
        Some(unit) if unit == "G" => 1024 * 1024 * 1024,
        Some(unit) => bail!(InvalidArgument, "unknown size unit '{}'", unit),
        None => 1,
    };

    value
        .checked_mul(multiplier)
        .ok_or_else(|| error!(InvalidArgument, "size '{}' is out of range", input))
}

/// Whether `path` is the root of the filesystem (`/` or a bare drive root)
pub fn is_filesystem_root(path: &Path) -> bool {
    path.is_absolute() && path.parent().is_none()
}

/// Render a relative path with `/` separators regardless of platform
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_parse_size_units() {
        assert_eq!(parse_size("4096").unwrap(), 4096);
        assert_eq!(parse_size("100K").unwrap(), 100 * 1024);
        assert_eq!(parse_size("50M").unwrap(), 50 * 1024 * 1024);
        assert_eq!(parse_size("50m").unwrap(), 50 * 1024 * 1024);
        assert_eq!(parse_size("1G").unwrap(), 1024 * 1024 * 1024);
        assert_eq!(parse_size("2MiB").unwrap(), 2 * 1024 * 1024);
        assert_eq!(parse_size("10kb").unwrap(), 10 * 1024);
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        assert!(parse_size("").is_err());
        assert!(parse_size("M").is_err());
        assert!(parse_size("1.5M").is_err());
        assert!(parse_size("10T").is_err());
        assert!(parse_size("-5").is_err());
        assert!(parse_size("99999999999999999999G").is_err());
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(12), "12 bytes");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_is_filesystem_root() {
        assert!(is_filesystem_root(Path::new("/")));
        assert!(!is_filesystem_root(Path::new("/home")));
        assert!(!is_filesystem_root(Path::new("relative")));
    }

    #[test]
    fn test_to_slash_path() {
        let path: PathBuf = ["a", "b", ".env"].iter().collect();
        assert_eq!(to_slash_path(&path), "a/b/.env");
        assert_eq!(to_slash_path(Path::new("")), "");
    }
}
