//! Line sorter: one entry point, dispatched over the closed set of sort modes

use crate::config::{SortMode, SortOrder};
use crate::error::{SortError, SortResult};
use crate::numeric::{LineKey, NumericGrammar, NumericKey};
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Inputs at least this long use rayon for key extraction and sorting
pub const PARALLEL_THRESHOLD: usize = 8192;

/// Reorders a sequence of lines according to a [`SortMode`] and [`SortOrder`].
///
/// Sorting is stable in every mode: lines that compare equal keep their
/// original relative order in both directions. Numeric modes move blank
/// lines to the front when ascending and to the back when descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSorter {
    mode: SortMode,
    order: SortOrder,
}

impl LineSorter {
    pub fn new(mode: SortMode, order: SortOrder) -> Self {
        Self { mode, order }
    }

    pub fn mode(&self) -> SortMode {
        self.mode
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Sort `lines` into a new vector, leaving the input untouched.
    ///
    /// Numeric modes fail with [`SortError::UnparseableLine`] carrying the
    /// lowest zero-based index of a line that holds content but no valid
    /// number; no partial result is produced in that case.
    pub fn sort<T>(&self, lines: &[T]) -> SortResult<Vec<T>>
    where
        T: AsRef<str> + Clone + Send + Sync,
    {
        let order = match self.mode.grammar() {
            None => self.lexicographic_order(lines),
            Some(grammar @ NumericGrammar::Integer) => self.numeric_order::<i64, T>(grammar, lines)?,
            Some(grammar @ (NumericGrammar::DecimalComma | NumericGrammar::DecimalDot)) => {
                self.numeric_order::<f64, T>(grammar, lines)?
            }
        };
        debug_assert_eq!(order.len(), lines.len());

        Ok(order.into_iter().map(|index| lines[index].clone()).collect())
    }

    /// Check whether `lines` are already in the order `sort` would produce.
    /// Returns the zero-based index of the first misplaced line.
    pub fn first_unsorted<T>(&self, lines: &[T]) -> SortResult<Option<usize>>
    where
        T: AsRef<str> + Clone + Send + Sync,
    {
        let sorted = self.sort(lines)?;
        Ok(lines
            .iter()
            .zip(&sorted)
            .position(|(original, sorted)| original.as_ref() != sorted.as_ref()))
    }

    /// Apply the direction to an ascending comparison
    #[inline]
    fn directed(&self, cmp: Ordering) -> Ordering {
        if self.order.is_descending() {
            cmp.reverse()
        } else {
            cmp
        }
    }

    /// Original indices of `lines` in full-text byte order
    fn lexicographic_order<T>(&self, lines: &[T]) -> Vec<usize>
    where
        T: AsRef<str> + Sync,
    {
        let mut order: Vec<usize> = (0..lines.len()).collect();
        let compare = |a: &usize, b: &usize| {
            self.directed(lines[*a].as_ref().cmp(lines[*b].as_ref()))
        };

        if order.len() >= PARALLEL_THRESHOLD {
            debug!(lines = order.len(), "parallel lexicographic sort");
            order.par_sort_by(compare);
        } else {
            order.sort_by(compare);
        }
        order
    }

    /// Original indices of `lines` ordered by numeric key, blanks spliced
    /// back at the low end (ascending) or high end (descending)
    fn numeric_order<K, T>(&self, grammar: NumericGrammar, lines: &[T]) -> SortResult<Vec<usize>>
    where
        K: NumericKey,
        T: AsRef<str> + Sync,
    {
        let parallel = lines.len() >= PARALLEL_THRESHOLD;
        let keys: Vec<LineKey<K>> = if parallel {
            lines
                .par_iter()
                .map(|line| grammar.extract(line.as_ref()))
                .collect()
        } else {
            lines.iter().map(|line| grammar.extract(line.as_ref())).collect()
        };

        let mut empties = Vec::new();
        let mut keyed: Vec<(usize, K)> = Vec::with_capacity(lines.len());
        for (index, key) in keys.into_iter().enumerate() {
            match key {
                LineKey::Empty => empties.push(index),
                LineKey::Key(key) => keyed.push((index, key)),
                LineKey::Unparseable => {
                    warn!(index, mode = %self.mode, "line is not a valid number");
                    return Err(SortError::unparseable_line(index));
                }
            }
        }
        debug!(
            mode = %self.mode,
            candidates = keyed.len(),
            empties = empties.len(),
            parallel,
            "partitioned input"
        );

        // Stable sorts, so equal keys stay in input order.
        let compare = |a: &(usize, K), b: &(usize, K)| self.directed(a.1.compare(&b.1));
        if parallel {
            keyed.par_sort_by(compare);
        } else {
            keyed.sort_by(compare);
        }

        let mut order = Vec::with_capacity(lines.len());
        if !self.order.is_descending() {
            order.extend_from_slice(&empties);
        }
        order.extend(keyed.iter().map(|(index, _)| *index));
        if self.order.is_descending() {
            order.extend_from_slice(&empties);
        }
        Ok(order)
    }
}

/// Sort `lines` with the given mode and order
pub fn sort_lines<T>(lines: &[T], mode: SortMode, order: SortOrder) -> SortResult<Vec<T>>
where
    T: AsRef<str> + Clone + Send + Sync,
{
    LineSorter::new(mode, order).sort(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MODES: [SortMode; 4] = [
        SortMode::Lexicographic,
        SortMode::Integer,
        SortMode::DecimalComma,
        SortMode::DecimalDot,
    ];

    fn sorted(lines: &[&str], mode: SortMode, order: SortOrder) -> Vec<String> {
        sort_lines(lines, mode, order)
            .expect("sort should succeed")
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn multiset(lines: &[impl AsRef<str>]) -> Vec<String> {
        let mut all: Vec<String> = lines.iter().map(|l| l.as_ref().to_string()).collect();
        all.sort();
        all
    }

    #[test]
    fn test_integer_ascending_puts_empties_first() {
        assert_eq!(
            sorted(&["10", "2", "", "-5"], SortMode::Integer, SortOrder::Ascending),
            vec!["", "-5", "2", "10"]
        );
    }

    #[test]
    fn test_integer_descending_puts_empties_last() {
        assert_eq!(
            sorted(&["10", "2", "", "-5"], SortMode::Integer, SortOrder::Descending),
            vec!["10", "2", "-5", ""]
        );
    }

    #[test]
    fn test_decimal_comma_reports_unparseable_line() {
        let input = vec!["3,5", "1,25", "abc"];
        let err = sort_lines(&input, SortMode::DecimalComma, SortOrder::Ascending)
            .expect_err("abc is not a number");
        assert!(matches!(err, SortError::UnparseableLine { index: 2 }));
        assert_eq!(input, vec!["3,5", "1,25", "abc"]);
    }

    #[test]
    fn test_first_failing_index_is_reported() {
        let input = ["1", "x", "2", "y"];
        let err = sort_lines(&input, SortMode::Integer, SortOrder::Descending)
            .expect_err("x is not a number");
        assert_eq!(err.unparseable_line_index(), Some(1));
    }

    #[test]
    fn test_decimal_dot_ascending() {
        assert_eq!(
            sorted(&["3.5", "1.25", " "], SortMode::DecimalDot, SortOrder::Ascending),
            vec![" ", "1.25", "3.5"]
        );
    }

    #[test]
    fn test_decimal_comma_orders_by_value() {
        assert_eq!(
            sorted(
                &["10,5", "-0,5", "2,25", "2,3"],
                SortMode::DecimalComma,
                SortOrder::Ascending
            ),
            vec!["-0,5", "2,25", "2,3", "10,5"]
        );
    }

    #[test]
    fn test_lexicographic_descending() {
        assert_eq!(
            sorted(
                &["banana", "apple", "cherry"],
                SortMode::Lexicographic,
                SortOrder::Descending
            ),
            vec!["cherry", "banana", "apple"]
        );
    }

    #[test]
    fn test_lexicographic_is_case_and_space_sensitive() {
        assert_eq!(
            sorted(
                &["b", "B", " a", "a", ""],
                SortMode::Lexicographic,
                SortOrder::Ascending
            ),
            vec!["", " a", "B", "a", "b"]
        );
    }

    #[test]
    fn test_lexicographic_never_fails() {
        let input = ["", "abc", "\u{e9}t\u{e9}", "12", " "];
        for order in [SortOrder::Ascending, SortOrder::Descending] {
            let out = sort_lines(&input, SortMode::Lexicographic, order)
                .expect("lexicographic sort cannot fail");
            assert_eq!(multiset(&out), multiset(&input));
        }
    }

    #[test]
    fn test_empty_and_single_inputs_are_unchanged() {
        let empty: [&str; 0] = [];
        for mode in ALL_MODES {
            for order in [SortOrder::Ascending, SortOrder::Descending] {
                assert!(sorted(&empty, mode, order).is_empty());
                assert_eq!(sorted(&["42"], mode, order), vec!["42"]);
                assert_eq!(sorted(&["  "], mode, order), vec!["  "]);
            }
        }
    }

    #[test]
    fn test_all_empty_lines_keep_order() {
        let input = ["", " ", "\t", "\r"];
        for mode in [SortMode::Integer, SortMode::DecimalComma, SortMode::DecimalDot] {
            for order in [SortOrder::Ascending, SortOrder::Descending] {
                assert_eq!(sorted(&input, mode, order), input.to_vec());
            }
        }
    }

    #[test]
    fn test_numeric_ties_keep_original_order() {
        let input = ["2 b", "1 x", "2 a", "01", "2"];
        assert_eq!(
            sorted(&input, SortMode::Integer, SortOrder::Ascending),
            vec!["1 x", "01", "2 b", "2 a", "2"]
        );
        assert_eq!(
            sorted(&input, SortMode::Integer, SortOrder::Descending),
            vec!["2 b", "2 a", "2", "1 x", "01"]
        );
    }

    #[test]
    fn test_negative_zero_ties_with_zero() {
        let input = ["0.0", "-0", "0"];
        assert_eq!(
            sorted(&input, SortMode::DecimalDot, SortOrder::Ascending),
            input.to_vec()
        );
        assert_eq!(
            sorted(&input, SortMode::DecimalDot, SortOrder::Descending),
            input.to_vec()
        );
    }

    #[test]
    fn test_underflowing_decimal_fails_the_sort() {
        let tiny = format!("0.{}1", "0".repeat(400));
        let input = vec![tiny.as_str(), "0", "-0"];
        let err = sort_lines(&input, SortMode::DecimalDot, SortOrder::Ascending)
            .expect_err("value underflows to zero");
        assert_eq!(err.unparseable_line_index(), Some(0));
    }

    #[test]
    fn test_empty_lines_keep_relative_order() {
        let input = ["3", " ", "1", "", "2", "\t"];
        assert_eq!(
            sorted(&input, SortMode::Integer, SortOrder::Ascending),
            vec![" ", "", "\t", "1", "2", "3"]
        );
        assert_eq!(
            sorted(&input, SortMode::Integer, SortOrder::Descending),
            vec!["3", "2", "1", " ", "", "\t"]
        );
    }

    #[test]
    fn test_trailing_text_is_ignored() {
        assert_eq!(
            sorted(
                &["12abc34", "3 apples", "100%"],
                SortMode::Integer,
                SortOrder::Ascending
            ),
            vec!["3 apples", "12abc34", "100%"]
        );
    }

    #[test]
    fn test_direction_symmetry_without_ties() {
        let input = ["5", "", "-3", "12", "7", " "];
        let ascending = sorted(&input, SortMode::Integer, SortOrder::Ascending);
        let descending = sorted(&input, SortMode::Integer, SortOrder::Descending);

        let ascending_numbers: Vec<_> = ascending.iter().filter(|l| !l.trim().is_empty()).collect();
        let mut descending_numbers: Vec<_> =
            descending.iter().filter(|l| !l.trim().is_empty()).collect();
        descending_numbers.reverse();
        assert_eq!(ascending_numbers, descending_numbers);

        assert_eq!(&ascending[..2], &["", " "]);
        assert_eq!(&descending[4..], &["", " "]);
    }

    #[test]
    fn test_owned_strings_are_supported() {
        let input: Vec<String> = vec!["b".into(), "a".into()];
        let out = LineSorter::new(SortMode::Lexicographic, SortOrder::Ascending)
            .sort(&input)
            .expect("sort should succeed");
        assert_eq!(out, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(input, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_parallel_path_matches_sequential_semantics() {
        let input: Vec<String> = (0..PARALLEL_THRESHOLD + 100)
            .map(|i| match i % 7 {
                0 => String::new(),
                n => format!("{} item{}", (i * 31) % 97, n),
            })
            .collect();

        for mode in [SortMode::Integer, SortMode::Lexicographic] {
            for order in [SortOrder::Ascending, SortOrder::Descending] {
                let out = sort_lines(&input, mode, order).expect("sort should succeed");
                assert_eq!(out.len(), input.len());
                assert_eq!(multiset(&out), multiset(&input));
                assert_eq!(
                    LineSorter::new(mode, order).first_unsorted(&out).expect("sortable"),
                    None
                );
            }
        }

        let out = sort_lines(&input, SortMode::Integer, SortOrder::Ascending)
            .expect("sort should succeed");
        let empties = input.iter().filter(|l| l.is_empty()).count();
        assert!(out[..empties].iter().all(|l| l.is_empty()));
        let keys: Vec<i64> = out[empties..]
            .iter()
            .map(|l| l.split(' ').next().and_then(|n| n.parse().ok()).expect("numeric"))
            .collect();
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_first_unsorted() {
        let sorter = LineSorter::new(SortMode::Integer, SortOrder::Ascending);
        assert_eq!(sorter.first_unsorted(&["", "1", "2"]).expect("sortable"), None);
        assert_eq!(sorter.first_unsorted(&["1", "", "2"]).expect("sortable"), Some(0));
        assert_eq!(sorter.first_unsorted(&["1", "3", "2"]).expect("sortable"), Some(1));
        assert!(sorter.first_unsorted(&["1", "nope"]).is_err());
    }
}
