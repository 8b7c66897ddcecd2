//! Numeric key extraction for the number-based sort modes
//!
//! Every grammar works in three steps: keep only the leading run of
//! characters the grammar admits, decide whether anything is left to
//! parse, and convert what is left with a fixed convention (`.` as the
//! decimal separator, no grouping). Conversion never consults the host
//! locale, so the same input sorts the same way everywhere.

use std::borrow::Cow;
use std::cmp::Ordering;

/// Characters treated as blank when deciding whether a line is empty
pub const BLANKS: [char; 4] = [' ', '\t', '\r', '\n'];

/// Textual number formats understood by the numeric sort modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericGrammar {
    /// Digits and a minus sign, parsed as `i64`
    Integer,
    /// Digits, minus sign and `,` as decimal separator, parsed as `f64`
    DecimalComma,
    /// Digits, minus sign and `.` as decimal separator, parsed as `f64`
    DecimalDot,
}

impl NumericGrammar {
    /// Check if `c` can be part of a number in this grammar
    #[inline]
    pub fn is_admissible(self, c: char) -> bool {
        if c.is_ascii_digit() || c == '-' || BLANKS.contains(&c) {
            return true;
        }
        match self {
            NumericGrammar::Integer => false,
            NumericGrammar::DecimalComma => c == ',',
            NumericGrammar::DecimalDot => c == '.',
        }
    }

    /// Longest prefix of `line` made only of admissible characters.
    ///
    /// Anything after the first inadmissible character is dropped, so
    /// `"12abc34"` yields `"12"`.
    pub fn admissible_prefix(self, line: &str) -> &str {
        match line.find(|c: char| !self.is_admissible(c)) {
            Some(end) => &line[..end],
            None => line,
        }
    }

    /// Admissible prefix rewritten to the fixed convention used for conversion
    pub fn prepare(self, line: &str) -> Cow<'_, str> {
        let prefix = self.admissible_prefix(line);
        match self {
            NumericGrammar::DecimalComma if prefix.contains(',') => {
                Cow::Owned(prefix.replace(',', "."))
            }
            _ => Cow::Borrowed(prefix),
        }
    }

    /// Classify `line` and convert it to a key of type `K`
    pub fn extract<K: NumericKey>(self, line: &str) -> LineKey<K> {
        let prepared = self.prepare(line);
        if is_blank(&prepared) && prepared.len() == line.len() {
            return LineKey::Empty;
        }
        match K::convert(&prepared) {
            Some(key) => LineKey::Key(key),
            None => LineKey::Unparseable,
        }
    }
}

/// Outcome of key extraction for a single line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineKey<K> {
    /// Nothing but blanks; kept aside and spliced back at one end
    Empty,
    Key(K),
    /// Content present but no valid number could be read from it
    Unparseable,
}

/// A totally ordered key produced from prepared line text
pub trait NumericKey: Copy + PartialOrd + Send + Sync {
    /// Convert text already reduced to the fixed convention.
    /// Returns `None` for malformed or out-of-range numbers.
    fn convert(prepared: &str) -> Option<Self>;

    #[inline]
    fn compare(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

impl NumericKey for i64 {
    fn convert(prepared: &str) -> Option<Self> {
        leading_numeral(prepared, false)?.parse().ok()
    }

    #[inline]
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl NumericKey for f64 {
    fn convert(prepared: &str) -> Option<Self> {
        let numeral = leading_numeral(prepared, true)?;
        let value: f64 = numeral.parse().ok()?;
        // Overflow to infinity and underflow to zero are both out of range.
        let underflow = value == 0.0 && numeral.bytes().any(|b| matches!(b, b'1'..=b'9'));
        (value.is_finite() && !underflow).then_some(value)
    }
}

/// Check if `text` holds nothing but blanks
#[inline]
pub fn is_blank(text: &str) -> bool {
    text.chars().all(|c| BLANKS.contains(&c))
}

/// Leading numeral of `text` after skipping blanks: an optional minus sign,
/// digits and, with `fraction`, one `.` followed by more digits.
/// At least one digit is required.
fn leading_numeral(text: &str, fraction: bool) -> Option<&str> {
    let text = text.trim_start_matches(&BLANKS[..]);
    let bytes = text.as_bytes();
    let mut end = 0;
    let mut digits = 0;

    if bytes.first() == Some(&b'-') {
        end += 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if fraction && end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }

    (digits > 0).then(|| &text[..end])
}
