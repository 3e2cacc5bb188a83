/*!
 * File content reading with size and binary guards
 */

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use crate::types::SkipReason;

/// Number of leading bytes inspected by the binary sniffer
pub const SNIFF_LEN: usize = 8192;

/// Minimum share of printable bytes for a sample to count as text
pub const MIN_PRINTABLE_RATIO: f32 = 0.7;

/// Reads included files, refusing large or binary ones
#[derive(Debug, Clone, Copy)]
pub struct ContentReader {
    max_size: u64,
}

impl ContentReader {
    /// Create a reader enforcing `max_size` bytes per file
    pub fn new(max_size: u64) -> Self {
        Self { max_size }
    }

    /// Size check only; never touches the file
    pub fn check_size(&self, size: u64) -> Option<SkipReason> {
        (size > self.max_size).then_some(SkipReason::TooLarge {
            size,
            limit: self.max_size,
        })
    }

    /// Decide whether a file of `size` bytes would be skipped, reading at
    /// most [`SNIFF_LEN`] bytes of it.
    pub fn probe(&self, path: &Path, size: u64) -> Option<SkipReason> {
        if let Some(reason) = self.check_size(size) {
            return Some(reason);
        }

        match sniff(path) {
            Ok(true) => Some(SkipReason::Binary),
            Ok(false) => None,
            Err(e) => Some(SkipReason::Unreadable(e.to_string())),
        }
    }

    /// Read a file as text.
    ///
    /// The size check happens before the file is opened. Invalid UTF-8 is
    /// replaced rather than rejected.
    pub fn read(&self, path: &Path) -> Result<String, SkipReason> {
        let size = fs::metadata(path)
            .map_err(|e| SkipReason::Unreadable(e.to_string()))?
            .len();
        if let Some(reason) = self.check_size(size) {
            return Err(reason);
        }

        let mut buf = Vec::with_capacity(size as usize);
        File::open(path)
            .and_then(|file| file.take(self.max_size).read_to_end(&mut buf))
            .map_err(|e| SkipReason::Unreadable(e.to_string()))?;

        if is_binary(&buf[..buf.len().min(SNIFF_LEN)]) {
            return Err(SkipReason::Binary);
        }

        Ok(match String::from_utf8(buf) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }
}

/// Read the head of a file and run [`is_binary`] on it
pub fn sniff(path: &Path) -> io::Result<bool> {
    let mut buf = Vec::with_capacity(SNIFF_LEN);
    File::open(path)?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut buf)?;
    Ok(is_binary(&buf))
}

/// Heuristic binary check on a sample.
///
/// A NUL byte means binary. Otherwise the sample is binary when fewer than
/// [`MIN_PRINTABLE_RATIO`] of its bytes are printable, where printable means
/// BEL, BS, TAB, LF, FF, CR, ESC or anything in `0x20..=0xFF` except DEL.
/// An empty sample is text.
pub fn is_binary(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return false;
    }
    if sample.contains(&0) {
        return true;
    }

    let printable = sample.iter().filter(|&&b| is_printable(b)).count();
    (printable as f32 / sample.len() as f32) < MIN_PRINTABLE_RATIO
}

fn is_printable(b: u8) -> bool {
    matches!(b, 7 | 8 | 9 | 10 | 12 | 13 | 27) || (b >= 0x20 && b != 0x7f)
}
