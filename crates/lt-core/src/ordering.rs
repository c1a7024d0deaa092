//! Entry ordering strategies for catalog listings.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// How sibling entries are ordered at each catalog level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Plain byte-wise string order: "Module 10" sorts before "Module 2".
    #[default]
    Lexical,
    /// Digit-aware order: runs of digits compare by numeric value,
    /// so "Module 2" sorts before "Module 10".
    Natural,
}

impl SortOrder {
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            SortOrder::Lexical => a.cmp(b),
            SortOrder::Natural => natural_cmp(a, b),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lexical" => Ok(SortOrder::Lexical),
            "natural" => Ok(SortOrder::Natural),
            other => Err(format!("unknown sort order '{other}' (expected lexical or natural)")),
        }
    }
}

/// Compare two names treating each run of ASCII digits as a number.
///
/// Names that only differ in leading zeros ("01" vs "1") fall back to
/// byte order so the result is still a total order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks { rest: a };
    let mut right = Chunks { rest: b };

    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = if is_digits(x) && is_digits(y) {
                    cmp_numeric(x, y)
                } else {
                    x.cmp(y)
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn is_digits(chunk: &str) -> bool {
    chunk.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

/// Compare digit runs of arbitrary length without parsing into an integer.
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Splits a string into alternating runs of digits and non-digits.
struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = self.rest.as_bytes().first()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .bytes()
            .position(|b| b.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        // Digits are ASCII, so `end` always lands on a char boundary.
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}
