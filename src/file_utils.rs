use anyhow::{Result, Context, anyhow};
use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::table::loader::BOM;

// @module: File and stream utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    /// Read a UTF-8 file to a string, dropping a leading byte-order mark
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> io::Result<String> {
        let text = fs::read_to_string(path)?;
        Ok(match text.strip_prefix(BOM) {
            Some(rest) => rest.to_string(),
            None => text,
        })
    }

    /// Open a file for buffered line reading
    pub fn open_reader<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;
        Ok(BufReader::new(file))
    }

    /// Expand input paths: files are kept as given, directories are replaced
    /// by the files beneath them in sorted order
    pub fn expand_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for path in paths {
            if Self::file_exists(path) {
                result.push(path.clone());
            } else if Self::dir_exists(path) {
                for entry in WalkDir::new(path).follow_links(true).sort_by_file_name() {
                    let entry = entry.context("Failed to read directory entry")?;
                    if entry.file_type().is_file() {
                        result.push(entry.into_path());
                    }
                }
            } else {
                return Err(anyhow!("Input path does not exist: {:?}", path));
            }
        }

        Ok(result)
    }
}

/// Line iterator for text streams.
///
/// Yields lines with their `\n` terminator (the last line may have none).
/// A leading byte-order mark on the first line is dropped. Line endings are
/// universal: `\r\n` and a lone `\r` both end a line and come out as `\n`.
pub struct TextLines<R> {
    reader: R,
    first: bool,
    // Lines split off a read that held lone `\r` breaks
    pending: VecDeque<String>,
}

impl<R: BufRead> TextLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            first: true,
            pending: VecDeque::new(),
        }
    }
}

impl<R: BufRead> Iterator for TextLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(line) = self.pending.pop_front() {
            return Some(Ok(line));
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                if self.first {
                    self.first = false;
                    if line.starts_with(BOM) {
                        line.remove(0);
                    }
                }
                if !line.contains('\r') {
                    return Some(Ok(line));
                }

                let line = line.replace("\r\n", "\n").replace('\r', "\n");
                self.pending.extend(line.split_inclusive('\n').map(String::from));
                self.pending.pop_front().map(Ok)
            }
            Err(e) => Some(Err(e)),
        }
    }
}
