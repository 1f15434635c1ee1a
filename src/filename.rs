//! Screenshot discovery and filename dating.
//!
//! Screenshots are exported one per month as `<anything>-YYYY-MM.png`, e.g.
//! `mypv-1601502406190027-2025-02.png`. The month a chart shows is read from its
//! name, never from its pixels.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::error::{ExtractionError, Result};

fn year_month_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)(\d{4})-(\d{2})\.png$").expect("static regex is valid"))
}

/// Reads `(year, month)` from a name ending in `YYYY-MM.png`.
pub fn parse_year_month(name: &str) -> Result<(i32, u32)> {
    let captures = year_month_pattern()
        .captures(name)
        .ok_or_else(|| ExtractionError::FilenameDate(name.to_string()))?;

    let year: i32 = captures[1]
        .parse()
        .map_err(|_| ExtractionError::FilenameDate(name.to_string()))?;
    let month: u32 = captures[2]
        .parse()
        .map_err(|_| ExtractionError::FilenameDate(name.to_string()))?;

    if !(1..=12).contains(&month) {
        return Err(ExtractionError::FilenameDate(name.to_string()));
    }
    Ok((year, month))
}

/// `.png` files directly inside `dir`, sorted by name.
pub fn discover_screenshots(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|err| ExtractionError::FileRead {
            path: err.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf()),
            source: err
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
        })?;

        let is_png = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if entry.file_type().is_file() && is_png {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
