//! Error handling for line sorting

use std::io;
use thiserror::Error;

/// Custom error type for sort operations
#[derive(Error, Debug)]
pub enum SortError {
    /// A non-empty line could not be converted to the numeric key of the
    /// active grammar. `index` is the zero-based position in the input.
    #[error("cannot parse line {} as a number", .index + 1)]
    UnparseableLine { index: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Permission denied: {file}")]
    PermissionDenied { file: String },

    #[error("No such file or directory: {file}")]
    FileNotFound { file: String },

    #[error("Is a directory: {file}")]
    IsDirectory { file: String },

    #[error("{file}:{line}: invalid UTF-8")]
    Utf8 { file: String, line: usize },

    #[error("Conflicting sort options: {message}")]
    ConflictingOptions { message: String },

    /// `line` is 1-based within `file`
    #[error("{file}:{line}: disorder")]
    NotSorted { file: String, line: usize },

    #[error("Thread pool error: {message}")]
    ThreadPoolError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },
}

impl SortError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SortError::NotSorted { .. } => crate::EXIT_FAILURE,

            SortError::PermissionDenied { .. }
            | SortError::FileNotFound { .. }
            | SortError::IsDirectory { .. }
            | SortError::Utf8 { .. }
            | SortError::Io(_)
            | SortError::UnparseableLine { .. } => crate::SORT_FAILURE,

            _ => crate::EXIT_FAILURE,
        }
    }

    /// Zero-based index of the offending line, for numeric conversion failures
    pub fn unparseable_line_index(&self) -> Option<usize> {
        match self {
            SortError::UnparseableLine { index } => Some(*index),
            _ => None,
        }
    }

    /// Create an unparseable line error
    pub fn unparseable_line(index: usize) -> Self {
        SortError::UnparseableLine { index }
    }

    /// Create a permission denied error
    pub fn permission_denied(file: &str) -> Self {
        SortError::PermissionDenied {
            file: file.to_string(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(file: &str) -> Self {
        SortError::FileNotFound {
            file: file.to_string(),
        }
    }

    /// Create an is directory error
    pub fn is_directory(file: &str) -> Self {
        SortError::IsDirectory {
            file: file.to_string(),
        }
    }

    /// Create an invalid UTF-8 error (`line` is 1-based)
    pub fn utf8(file: &str, line: usize) -> Self {
        SortError::Utf8 {
            file: file.to_string(),
            line,
        }
    }

    /// Create a conflicting options error
    pub fn conflicting_options(message: &str) -> Self {
        SortError::ConflictingOptions {
            message: message.to_string(),
        }
    }

    /// Create a not sorted error
    pub fn not_sorted(file: &str, line: usize) -> Self {
        SortError::NotSorted {
            file: file.to_string(),
            line,
        }
    }

    /// Create a thread pool error
    pub fn thread_pool_error(message: &str) -> Self {
        SortError::ThreadPoolError {
            message: message.to_string(),
        }
    }

    /// Create a parse error
    pub fn parse_error(message: &str) -> Self {
        SortError::ParseError {
            message: message.to_string(),
        }
    }
}

/// Result type for sort operations
pub type SortResult<T> = Result<T, SortError>;

/// Context trait for attaching file names to I/O failures
pub trait SortContext<T> {
    fn with_file_context(self, filename: &str) -> SortResult<T>;
}

impl<T> SortContext<T> for Result<T, io::Error> {
    fn with_file_context(self, filename: &str) -> SortResult<T> {
        self.map_err(|io_err| match io_err.kind() {
            io::ErrorKind::PermissionDenied => SortError::permission_denied(filename),
            io::ErrorKind::NotFound => SortError::file_not_found(filename),
            _ => SortError::Io(io::Error::new(
                io_err.kind(),
                format!("{}: {}", filename, io_err),
            )),
        })
    }
}
