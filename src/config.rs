//! Configuration management for sort operations

use crate::error::{SortError, SortResult};
use crate::numeric::NumericGrammar;
use std::str::FromStr;

/// Ordering strategy applied to the lines.
///
/// The set is closed: every consumer matches on it exhaustively, so adding a
/// strategy is a compile-time checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Plain comparison of the full line text
    Lexicographic,
    /// Leading signed 64-bit integer
    Integer,
    /// Leading decimal number written with a comma separator (`3,5`)
    DecimalComma,
    /// Leading decimal number written with a dot separator (`3.5`)
    DecimalDot,
}

impl SortMode {
    /// Numeric grammar used by this mode, if any
    pub fn grammar(self) -> Option<NumericGrammar> {
        match self {
            SortMode::Lexicographic => None,
            SortMode::Integer => Some(NumericGrammar::Integer),
            SortMode::DecimalComma => Some(NumericGrammar::DecimalComma),
            SortMode::DecimalDot => Some(NumericGrammar::DecimalDot),
        }
    }

    /// Check if this mode orders by a numeric key
    pub fn is_numeric(self) -> bool {
        self.grammar().is_some()
    }
}

/// Sort order enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }

    pub fn is_descending(self) -> bool {
        self == SortOrder::Descending
    }
}

/// Main configuration structure for sort operations
#[derive(Debug, Clone)]
pub struct SortConfig {
    /// Ordering strategy
    pub mode: SortMode,
    /// Sort order (normal or reverse)
    pub reverse: bool,
    /// Check if input is already sorted
    pub check: bool,
    /// Use zero bytes as line terminators instead of newlines
    pub zero_terminated: bool,
    /// Output file path
    pub output_file: Option<String>,
    /// Files to read from (if not specified, use stdin)
    pub input_files: Vec<String>,
    /// Number of parallel threads to use
    pub parallel_threads: Option<usize>,
    /// Debug mode (for troubleshooting)
    pub debug: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            mode: SortMode::Lexicographic,
            reverse: false,
            check: false,
            zero_terminated: false,
            output_file: None,
            input_files: Vec::new(),
            parallel_threads: None,
            debug: false,
        }
    }
}

impl SortConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sort mode
    pub fn with_mode(mut self, mode: SortMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable reverse sorting
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Enable check mode
    pub fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    /// Enable zero-terminated lines
    pub fn with_zero_terminated(mut self, zero_terminated: bool) -> Self {
        self.zero_terminated = zero_terminated;
        self
    }

    /// Set output file
    pub fn with_output_file(mut self, output_file: Option<String>) -> Self {
        self.output_file = output_file;
        self
    }

    /// Set input files
    pub fn with_input_files(mut self, files: Vec<String>) -> Self {
        self.input_files = files;
        self
    }

    /// Set parallel threads
    pub fn with_parallel_threads(mut self, threads: Option<usize>) -> Self {
        self.parallel_threads = threads;
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> SortResult<()> {
        if self.check && self.output_file.is_some() {
            return Err(SortError::conflicting_options(
                "--check does not produce output, --output cannot be used with it",
            ));
        }

        if let Some(threads) = self.parallel_threads {
            if threads == 0 {
                return Err(SortError::thread_pool_error(
                    "thread count must be positive",
                ));
            }
            if threads > 1024 {
                return Err(SortError::thread_pool_error(
                    "too many threads (maximum 1024)",
                ));
            }
        }

        Ok(())
    }

    /// Get the effective sort order
    pub fn sort_order(&self) -> SortOrder {
        SortOrder::from_descending(self.reverse)
    }

    /// Line delimiter byte
    pub fn delimiter(&self) -> u8 {
        if self.zero_terminated {
            b'\0'
        } else {
            b'\n'
        }
    }

    /// Check if reading from stdin
    pub fn reading_from_stdin(&self) -> bool {
        self.input_files.is_empty() || (self.input_files.len() == 1 && self.input_files[0] == "-")
    }

    /// Get effective thread count
    pub fn effective_thread_count(&self) -> usize {
        self.parallel_threads.unwrap_or_else(num_cpus::get)
    }
}

impl FromStr for SortMode {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lexicographic" | "text" | "default" => Ok(SortMode::Lexicographic),
            "integer" | "int" | "numeric" => Ok(SortMode::Integer),
            "decimal-comma" | "comma" => Ok(SortMode::DecimalComma),
            "decimal-dot" | "dot" | "decimal" => Ok(SortMode::DecimalDot),
            _ => Err(SortError::parse_error(&format!("unknown sort mode: {s}"))),
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SortMode::Lexicographic => "lexicographic",
            SortMode::Integer => "integer",
            SortMode::DecimalComma => "decimal-comma",
            SortMode::DecimalDot => "decimal-dot",
        };
        write!(f, "{name}")
    }
}

/// Builder pattern for creating configurations
pub struct SortConfigBuilder {
    config: SortConfig,
}

impl SortConfigBuilder {
    /// Start building a new configuration
    pub fn new() -> Self {
        Self {
            config: SortConfig::default(),
        }
    }

    /// Set sort mode
    pub fn mode(mut self, mode: SortMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Enable reverse sorting
    pub fn reverse(mut self) -> Self {
        self.config.reverse = true;
        self
    }

    /// Enable check mode
    pub fn check(mut self) -> Self {
        self.config.check = true;
        self
    }

    /// Enable zero-terminated lines
    pub fn zero_terminated(mut self) -> Self {
        self.config.zero_terminated = true;
        self
    }

    /// Set output file
    pub fn output_file(mut self, file: String) -> Self {
        self.config.output_file = Some(file);
        self
    }

    /// Set input files
    pub fn input_files(mut self, files: Vec<String>) -> Self {
        self.config.input_files = files;
        self
    }

    /// Set parallel threads
    pub fn parallel_threads(mut self, threads: usize) -> Self {
        self.config.parallel_threads = Some(threads);
        self
    }

    /// Enable debug mode
    pub fn debug(mut self) -> Self {
        self.config.debug = true;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SortResult<SortConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for SortConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Preset configurations for common use cases
pub mod presets {
    use super::*;

    /// Configuration for integer sorting
    pub fn integer() -> SortConfig {
        SortConfig::new().with_mode(SortMode::Integer)
    }

    /// Configuration for decimal numbers written with a comma
    pub fn decimal_comma() -> SortConfig {
        SortConfig::new().with_mode(SortMode::DecimalComma)
    }

    /// Configuration for decimal numbers written with a dot
    pub fn decimal_dot() -> SortConfig {
        SortConfig::new().with_mode(SortMode::DecimalDot)
    }

    /// Configuration for reverse sorting
    pub fn reverse() -> SortConfig {
        SortConfig::new().with_reverse(true)
    }
}
