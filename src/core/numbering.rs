use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::SynthError;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Rank of a calendar month (1 = January) in a fiscal year starting in April.
///
/// April is 1, March is 12.
pub fn fiscal_month_rank(month: u32) -> u32 {
    (month + 8) % 12 + 1
}

/// Invoice number of the form `{MON}-{sequence}`, e.g. `APR-007`.
///
/// The month is the invoice date's calendar month; the sequence comes from
/// a run-wide counter shared by all parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvoiceNumber {
    month: u32,
    sequence: u64,
}

impl InvoiceNumber {
    /// Build a number from a calendar month (1-12) and sequence value.
    pub fn new(month: u32, sequence: u64) -> Result<Self, SynthError> {
        if !(1..=12).contains(&month) {
            return Err(SynthError::Numbering(format!(
                "month {month} is outside 1..=12"
            )));
        }
        Ok(Self { month, sequence })
    }

    /// Calendar month, 1 = January.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Three-letter uppercase month prefix.
    pub fn month_abbreviation(&self) -> &'static str {
        MONTH_ABBREVIATIONS[(self.month - 1) as usize]
    }

    /// Ledger sort key: fiscal month rank, then sequence.
    pub fn fiscal_key(&self) -> (u32, u64) {
        (fiscal_month_rank(self.month), self.sequence)
    }
}

impl fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:03}", self.month_abbreviation(), self.sequence)
    }
}

impl FromStr for InvoiceNumber {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (prefix, digits) = s
            .split_once('-')
            .ok_or_else(|| SynthError::Numbering(format!("'{s}' has no '-' separator")))?;

        let prefix = prefix.to_ascii_uppercase();
        let month = MONTH_ABBREVIATIONS
            .iter()
            .position(|abbr| *abbr == prefix)
            .ok_or_else(|| SynthError::Numbering(format!("unknown month prefix in '{s}'")))?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SynthError::Numbering(format!(
                "sequence in '{s}' is not numeric"
            )));
        }
        let sequence = digits
            .parse::<u64>()
            .map_err(|e| SynthError::Numbering(format!("sequence in '{s}': {e}")))?;

        Self::new(month as u32 + 1, sequence)
    }
}

impl Serialize for InvoiceNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for InvoiceNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Gapless run-wide invoice counter.
///
/// Issues numbers in the format `{MON}-{sequential}` where the month is
/// taken from the invoice date; the counter itself never resets.
#[derive(Debug, Clone)]
pub struct InvoiceNumberSequence {
    next_number: u64,
}

impl InvoiceNumberSequence {
    /// Create a sequence starting at 1.
    pub fn new() -> Self {
        Self { next_number: 1 }
    }

    /// Create a sequence continuing from a given number.
    pub fn starting_at(next_number: u64) -> Self {
        Self { next_number }
    }

    /// Issue the next number for an invoice dated `date`.
    pub fn next_number(&mut self, date: NaiveDate) -> InvoiceNumber {
        let number = self.peek(date);
        self.next_number += 1;
        number
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self, date: NaiveDate) -> InvoiceNumber {
        InvoiceNumber {
            month: date.month(),
            sequence: self.next_number,
        }
    }

    /// Get the next sequence value that will be issued.
    pub fn next_raw(&self) -> u64 {
        self.next_number
    }
}

impl Default for InvoiceNumberSequence {
    fn default() -> Self {
        Self::new()
    }
}
