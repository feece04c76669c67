//! Spreadsheet-style grid coordinates.
//!
//! Columns are labelled with a bijective base-26 numeral (`A`..`Z`, `AA`..`ZZ`,
//! `AAA`, ...) and rows with 1-based decimal numbers. A point is written as
//! `<LETTERS><DIGITS>` in canonical form, but input may use either order and
//! any letter case: `a1`, `1A` and `A1` all name the same cell.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::{GridError, Result};

static POINT_PATTERN: OnceLock<Regex> = OnceLock::new();

fn point_pattern() -> &'static Regex {
    POINT_PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?:(?P<letters>[A-Za-z]+)(?P<digits>[0-9]+)|(?P<digits_first>[0-9]+)(?P<letters_second>[A-Za-z]+))$",
        )
        .expect("point pattern is a valid regex")
    })
}

/// Convert a 0-based column index to its letter label.
///
/// `0 -> "A"`, `25 -> "Z"`, `26 -> "AA"`, `701 -> "ZZ"`.
pub fn column_to_label(index: usize) -> String {
    let mut letters = Vec::new();
    // Work 1-based: no digit of a bijective numeral is zero.
    let mut n = index as u128 + 1;
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Convert a letter label back to its 0-based column index.
///
/// Case-insensitive. Returns `None` for an empty label, a non-alphabetic
/// character, or a label too long to fit in `usize`.
pub fn label_to_column(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut value: u128 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as u128 + 1;
        value = value.checked_mul(26)?.checked_add(digit)?;
    }
    usize::try_from(value - 1).ok()
}

/// The two shapes a raw point may take, as written by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawPoint<'a> {
    /// `A1`, `aaz123`
    LettersFirst { letters: &'a str, digits: &'a str },
    /// `1A`, `123aaz`
    DigitsFirst { digits: &'a str, letters: &'a str },
}

impl<'a> RawPoint<'a> {
    /// Split raw input into its letter and digit runs.
    ///
    /// The whole input must be consumed: no whitespace, separators or other
    /// characters are allowed anywhere.
    pub fn parse(raw: &'a str) -> Result<Self> {
        let caps = point_pattern()
            .captures(raw)
            .ok_or_else(|| GridError::InvalidFormat(raw.to_string()))?;

        let raw_point = match (caps.name("letters"), caps.name("digits")) {
            (Some(letters), Some(digits)) => RawPoint::LettersFirst {
                letters: letters.as_str(),
                digits: digits.as_str(),
            },
            _ => match (caps.name("digits_first"), caps.name("letters_second")) {
                (Some(digits), Some(letters)) => RawPoint::DigitsFirst {
                    digits: digits.as_str(),
                    letters: letters.as_str(),
                },
                _ => return Err(GridError::InvalidFormat(raw.to_string())),
            },
        };
        Ok(raw_point)
    }

    fn letters(&self) -> &'a str {
        match *self {
            RawPoint::LettersFirst { letters, .. } | RawPoint::DigitsFirst { letters, .. } => {
                letters
            }
        }
    }

    fn digits(&self) -> &'a str {
        match *self {
            RawPoint::LettersFirst { digits, .. } | RawPoint::DigitsFirst { digits, .. } => digits,
        }
    }
}

/// A canonical grid cell: 0-based column, 1-based row.
///
/// Displays as its canonical label, e.g. `GridPoint { column: 0, row: 1 }`
/// is `A1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint {
    pub column: usize,
    pub row: usize,
}

impl GridPoint {
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// The canonical `<LETTERS><DIGITS>` label.
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Whether this point lies on a `size` x `size` grid.
    pub fn is_within(&self, size: usize) -> bool {
        self.column < size && self.row >= 1 && self.row <= size
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_to_label(self.column), self.row)
    }
}

impl FromStr for GridPoint {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        normalize(s)
    }
}

impl TryFrom<RawPoint<'_>> for GridPoint {
    type Error = GridError;

    fn try_from(raw: RawPoint<'_>) -> Result<Self> {
        // Both runs matched the pattern. What is left to reject are rows no
        // grid has: a leading zero (`A01`, `A0`) or a number too large for
        // any real cell. Labels keep their digits as written, so `A01` is not
        // `A1`.
        let out_of_range = || GridError::OutOfRange(format!("{}{}", raw.letters(), raw.digits()));
        if raw.digits().starts_with('0') {
            return Err(out_of_range());
        }
        let column = label_to_column(raw.letters()).ok_or_else(out_of_range)?;
        let row = raw.digits().parse::<usize>().map_err(|_| out_of_range())?;
        Ok(GridPoint { column, row })
    }
}

/// Normalize a free-form point string (`"1a"`, `"A1"`, `"aaz123"`, `"123AAZ"`)
/// into a canonical [`GridPoint`].
pub fn normalize(raw: &str) -> Result<GridPoint> {
    GridPoint::try_from(RawPoint::parse(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_to_label_single_letters() {
        assert_eq!(column_to_label(0), "A");
        assert_eq!(column_to_label(1), "B");
        assert_eq!(column_to_label(25), "Z");
    }

    #[test]
    fn test_column_to_label_rolls_over() {
        assert_eq!(column_to_label(26), "AA");
        assert_eq!(column_to_label(27), "AB");
        assert_eq!(column_to_label(51), "AZ");
        assert_eq!(column_to_label(52), "BA");
        assert_eq!(column_to_label(701), "ZZ");
        assert_eq!(column_to_label(702), "AAA");
    }

    #[test]
    fn test_column_to_label_large_index() {
        let label = column_to_label(usize::MAX);
        assert!(label.chars().all(|c| c.is_ascii_uppercase()));
        assert_eq!(label_to_column(&label), Some(usize::MAX));
    }

    #[test]
    fn test_label_to_column_inverts() {
        for index in 0..2000 {
            assert_eq!(label_to_column(&column_to_label(index)), Some(index));
        }
    }

    #[test]
    fn test_label_to_column_case_insensitive() {
        assert_eq!(label_to_column("aa"), Some(26));
        assert_eq!(label_to_column("zZ"), Some(701));
    }

    #[test]
    fn test_label_to_column_rejects_bad_input() {
        assert_eq!(label_to_column(""), None);
        assert_eq!(label_to_column("A1"), None);
        assert_eq!(label_to_column("ÄB"), None);
        assert_eq!(label_to_column(&"Z".repeat(40)), None);
    }

    #[test]
    fn test_labels_are_monotonic() {
        let mut previous = column_to_label(0);
        for index in 1..1000 {
            let label = column_to_label(index);
            assert!(
                (label.len(), &label) > (previous.len(), &previous),
                "{} should sort after {}",
                label,
                previous
            );
            previous = label;
        }
    }

    #[test]
    fn test_raw_point_shapes() {
        assert_eq!(
            RawPoint::parse("aaz123").unwrap(),
            RawPoint::LettersFirst {
                letters: "aaz",
                digits: "123"
            }
        );
        assert_eq!(
            RawPoint::parse("123AAZ").unwrap(),
            RawPoint::DigitsFirst {
                digits: "123",
                letters: "AAZ"
            }
        );
    }

    #[test]
    fn test_normalize_case_and_order() {
        for raw in ["a1", "A1", "1a", "1A"] {
            assert_eq!(normalize(raw).unwrap().label(), "A1", "input {}", raw);
        }
    }

    #[test]
    fn test_normalize_multi_letter() {
        assert_eq!(normalize("aaz123").unwrap().label(), "AAZ123");
        assert_eq!(normalize("123AAZ").unwrap().label(), "AAZ123");
    }

    #[test]
    fn test_normalize_leading_zero_row_is_out_of_range() {
        for raw in ["A01", "b007", "01A", "A0", "0a"] {
            assert!(
                matches!(normalize(raw), Err(GridError::OutOfRange(_))),
                "input {:?} should be out of range",
                raw
            );
        }
        assert_eq!(normalize("b10").unwrap(), GridPoint::new(1, 10));
    }

    #[test]
    fn test_normalize_invalid_format() {
        for raw in ["", "A", "1", "A1B", "1A1", " A1", "A1 ", "A 1", "A-1", "é1", "A１"] {
            assert!(
                matches!(normalize(raw), Err(GridError::InvalidFormat(_))),
                "input {:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_normalize_huge_row_is_out_of_range() {
        let raw = format!("A{}", "9".repeat(40));
        assert!(matches!(normalize(&raw), Err(GridError::OutOfRange(_))));
    }

    #[test]
    fn test_grid_point_within() {
        assert!(GridPoint::new(0, 1).is_within(6));
        assert!(GridPoint::new(5, 6).is_within(6));
        assert!(!GridPoint::new(6, 1).is_within(6));
        assert!(!GridPoint::new(0, 7).is_within(6));
        assert!(!GridPoint::new(0, 0).is_within(6));
    }

    #[test]
    fn test_grid_point_from_str() {
        let point: GridPoint = "3c".parse().unwrap();
        assert_eq!(point, GridPoint::new(2, 3));
        assert_eq!(point.to_string(), "C3");
    }
}
