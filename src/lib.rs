//! Editor-style line sorting
//!
//! Reorders a sequence of text lines lexicographically or by a leading
//! number (integer, decimal with comma, decimal with dot). Numeric modes
//! move blank lines to one end, keep equal keys in input order and report
//! the index of the first line that holds text but no readable number.
//!
//! ```
//! use line_sort::{sort_lines, SortMode, SortOrder};
//!
//! let sorted = sort_lines(&["10", "2", "", "-5"], SortMode::Integer, SortOrder::Ascending)?;
//! assert_eq!(sorted, ["", "-5", "2", "10"]);
//! # Ok::<(), line_sort::SortError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

pub mod error;
pub mod config;

// Sorting core
pub mod numeric;
pub mod sorter;

// Input/output collaborators
pub mod input;
pub mod core_sort;

// Re-export commonly used types
pub use error::{SortError, SortResult};
pub use config::{SortConfig, SortMode, SortOrder};
pub use numeric::NumericGrammar;
pub use sorter::{sort_lines, LineSorter};

/// Exit codes matching GNU sort
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const SORT_FAILURE: i32 = 2;

/// Sort, or check, the inputs named by `config`
pub fn sort(config: &SortConfig) -> SortResult<i32> {
    crate::core_sort::CoreSort::new(config.clone()).run()?;
    Ok(EXIT_SUCCESS)
}
