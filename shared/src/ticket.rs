//! Queue ticket value type
//!
//! A ticket is one uppercase area code letter followed by a 7-digit
//! zero-padded number, e.g. `A0000001`. Tickets are assigned once at
//! registration and never change afterwards, so the type is immutable
//! and validates on every construction path (new, parse, deserialize).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fixed width of the numeric portion of a ticket
pub const NUMBER_WIDTH: usize = 7;

/// Highest number the 7-digit space can hold
pub const MAX_NUMBER: u32 = 9_999_999;

/// A validated queue ticket
///
/// Ordering is by area code first, then numerically by suffix. The numeric
/// ordering matters: `A0000010 > A0000002` even though the padded strings
/// happen to agree here, later comparisons must never fall back to
/// lexicographic order of unparsed suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TicketNumber {
    code: char,
    number: u32,
}

/// Error when a string does not form a valid ticket
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketParseError {
    /// Not one code letter plus exactly 7 digits
    #[error("invalid ticket length: {0:?}")]
    Length(String),
    /// Leading character is not an uppercase ASCII letter
    #[error("invalid area code in ticket: {0:?}")]
    Code(String),
    /// Numeric suffix contains non-digit characters
    #[error("invalid ticket number: {0:?}")]
    Number(String),
    /// Number outside 1..=9_999_999
    #[error("ticket number out of range: {0}")]
    Range(u32),
}

impl TicketNumber {
    /// Build a ticket from its parts, validating both
    pub fn new(code: char, number: u32) -> Result<Self, TicketParseError> {
        if !code.is_ascii_uppercase() {
            return Err(TicketParseError::Code(code.to_string()));
        }
        if number == 0 || number > MAX_NUMBER {
            return Err(TicketParseError::Range(number));
        }
        Ok(Self { code, number })
    }

    /// The one-letter area code prefix
    pub fn code(&self) -> char {
        self.code
    }

    /// The numeric suffix (1..=9_999_999)
    pub fn number(&self) -> u32 {
        self.number
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:07}", self.code, self.number)
    }
}

impl FromStr for TicketNumber {
    type Err = TicketParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let code = chars
            .next()
            .ok_or_else(|| TicketParseError::Length(s.to_string()))?;
        if !code.is_ascii_uppercase() {
            return Err(TicketParseError::Code(s.to_string()));
        }

        let rest = chars.as_str();
        if rest.len() != NUMBER_WIDTH {
            return Err(TicketParseError::Length(s.to_string()));
        }
        if !rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TicketParseError::Number(s.to_string()));
        }
        // 7 ASCII digits always fit in u32
        let number: u32 = rest
            .parse()
            .map_err(|_| TicketParseError::Number(s.to_string()))?;
        if number == 0 {
            return Err(TicketParseError::Range(number));
        }

        Ok(Self { code, number })
    }
}

impl From<TicketNumber> for String {
    fn from(ticket: TicketNumber) -> Self {
        ticket.to_string()
    }
}

impl TryFrom<String> for TicketNumber {
    type Error = TicketParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
