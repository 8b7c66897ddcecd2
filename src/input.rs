//! Reading line sequences from files and streams

use crate::error::{SortContext, SortError, SortResult};
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Memory-mapped input file split into lines
pub struct MappedFile {
    lines: Vec<String>,
}

impl MappedFile {
    /// Map `path` and split its contents on `delimiter`
    pub fn new(path: &Path, delimiter: u8) -> SortResult<Self> {
        let name = path.display().to_string();
        if path.is_dir() {
            return Err(SortError::is_directory(&name));
        }

        let file = File::open(path).with_file_context(&name)?;
        let len = file.metadata().with_file_context(&name)?.len();

        // Zero-length files cannot be mapped on every platform.
        let lines = if len == 0 {
            Vec::new()
        } else {
            // SAFETY: the mapping is read-only and dropped before this
            // function returns; lines are copied out as owned strings.
            let mmap = unsafe { Mmap::map(&file) }.with_file_context(&name)?;
            split_lines(&mmap, delimiter, &name)?
        };

        Ok(Self { lines })
    }

    /// Get the lines in this file
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Read all lines of `path`
pub fn read_lines(path: &Path, delimiter: u8) -> SortResult<Vec<String>> {
    MappedFile::new(path, delimiter).map(MappedFile::into_lines)
}

/// Read all lines from a stream such as stdin; `name` is used in errors
pub fn read_lines_from<R: Read>(mut reader: R, delimiter: u8, name: &str) -> SortResult<Vec<String>> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer).with_file_context(name)?;
    split_lines(&buffer, delimiter, name)
}

/// Split `data` on `delimiter`. A final delimiter does not start an extra
/// line, and `\r` before a newline stays part of the line.
pub fn split_lines(data: &[u8], delimiter: u8, name: &str) -> SortResult<Vec<String>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    let data = data.strip_suffix(&[delimiter]).unwrap_or(data);

    data.split(|&byte| byte == delimiter)
        .enumerate()
        .map(|(index, raw)| {
            std::str::from_utf8(raw)
                .map(str::to_owned)
                .map_err(|_| SortError::utf8(name, index + 1))
        })
        .collect()
}
