//! National identifier with a mod-11 check character.
//!
//! The body's digits are weighted 2, 3, 4, 5, 6, 7, 2, 3, ... starting from
//! the least significant digit. The check value is `11 - (sum mod 11)`, with
//! 11 written as `0` and 10 written as `K`.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::AnonymizeError;

/// Smallest synthetic body (eight digits).
pub const BODY_MIN: u32 = 10_000_000;

/// Largest synthetic body (eight digits).
pub const BODY_MAX: u32 = 99_999_999;

/// Computes the check character for a numeric body.
///
/// ```
/// use grd_anonymize::check_digit;
///
/// assert_eq!(check_digit(16_014_303), '7');
/// assert_eq!(check_digit(10_000_013), 'K');
/// ```
pub fn check_digit(body: u32) -> char {
    let mut sum = 0;
    let mut weight = 2;
    let mut rest = body;
    loop {
        sum += (rest % 10) * weight;
        weight = if weight == 7 { 2 } else { weight + 1 };
        rest /= 10;
        if rest == 0 {
            break;
        }
    }

    match 11 - sum % 11 {
        11 => '0',
        10 => 'K',
        digit => char::from_digit(digit, 10).unwrap_or('0'),
    }
}

/// A national identifier: numeric body plus check character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NationalId {
    body: u32,
    check: char,
}

impl NationalId {
    /// Builds an identifier, deriving the check character from `body`.
    pub fn from_body(body: u32) -> Self {
        Self {
            body,
            check: check_digit(body),
        }
    }

    pub fn body(&self) -> u32 {
        self.body
    }

    pub fn check(&self) -> char {
        self.check
    }
}

impl fmt::Display for NationalId {
    /// Formats as `NN.NNN.NNN-C`, grouping the body in thousands.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.body.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (index, ch) in digits.chars().enumerate() {
            if index > 0 && (digits.len() - index) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        write!(f, "{grouped}-{}", self.check)
    }
}

impl FromStr for NationalId {
    type Err = AnonymizeError;

    /// Parses dotted (`16.014.303-7`) or undotted (`16014303-7`) identifiers.
    /// The `K` check character is accepted in either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| AnonymizeError::InvalidIdentifier {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let (body_text, check_text) = trimmed
            .rsplit_once('-')
            .ok_or_else(|| invalid("missing '-' before the check character"))?;

        let digits: String = body_text.chars().filter(|c| *c != '.').collect();
        if digits.is_empty() || digits.len() > 8 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("body must be one to eight digits"));
        }
        let body: u32 = digits
            .parse()
            .map_err(|_| invalid("body must be one to eight digits"))?;

        let mut check_chars = check_text.chars();
        let check = match (check_chars.next(), check_chars.next()) {
            (Some(c), None) => c.to_ascii_uppercase(),
            _ => return Err(invalid("check must be a single character")),
        };

        let expected = check_digit(body);
        if check != expected {
            return Err(invalid(&format!("check character should be {expected}")));
        }
        Ok(Self { body, check })
    }
}

impl Serialize for NationalId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Whether `text` is a well-formed identifier whose check character matches.
pub fn is_valid_identifier(text: &str) -> bool {
    text.parse::<NationalId>().is_ok()
}
