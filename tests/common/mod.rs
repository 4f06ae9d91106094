/*!
 * Common test utilities for the sanzang test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Sample three-column table: source, English, pinyin
pub const SAMPLE_TABLE: &str = "\
火山|volcano|huo3 shan1
火|fire|huo3
山|mountain|shan1
水|water|shui3
";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates the sample translation table for testing
pub fn create_test_table(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_TABLE)
}

/// Source line numbers found in a listing, in output order
pub fn listing_line_numbers(listing: &str) -> Vec<usize> {
    listing
        .lines()
        .filter_map(|line| line.split_once(".1|"))
        .filter_map(|(number, _)| number.parse().ok())
        .collect()
}
