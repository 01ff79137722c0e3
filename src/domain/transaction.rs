use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use super::{Amount, format_amount};

pub type TransactionId = u64;

/// Whether money enters or leaves the cash book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Money coming in (salary, refunds, deposits)
    Inflow,
    /// Money going out (purchases, bills, withdrawals)
    Outflow,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Inflow => "inflow",
            Direction::Outflow => "outflow",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inflow" => Ok(Direction::Inflow),
            "outflow" => Ok(Direction::Outflow),
            _ => Err(ParseDirectionError(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(pub String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "direction must be 'inflow' or 'outflow', got '{}'",
            self.0
        )
    }
}

impl std::error::Error for ParseDirectionError {}

/// Returns true if the amount may be stored: finite and not negative.
pub fn is_valid_amount(amount: Amount) -> bool {
    amount.is_finite() && amount >= 0.0
}

/// A single recorded movement of funds.
///
/// `D` is the day type. Anything totally ordered works; the console uses
/// calendar dates, tests often use plain day numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction<D = NaiveDate> {
    /// Assigned by the ledger, never reused
    pub id: TransactionId,
    pub day: D,
    pub amount: Amount,
    pub direction: Direction,
}

impl<D> Transaction<D> {
    pub fn new(id: TransactionId, day: D, amount: Amount, direction: Direction) -> Self {
        Self {
            id,
            day,
            amount,
            direction,
        }
    }
}

impl<D: PartialEq> Transaction<D> {
    /// Value identity used by updates: same day, same amount, same direction.
    pub fn matches(&self, day: &D, amount: Amount, direction: Direction) -> bool {
        self.day == *day && self.amount == amount && self.direction == direction
    }
}

impl<D: PartialOrd> Transaction<D> {
    /// True if the day lies in `[start, end]`. An inverted range matches nothing.
    pub fn is_within(&self, start: &D, end: &D) -> bool {
        *start <= self.day && self.day <= *end
    }
}

impl<D: fmt::Display> fmt::Display for Transaction<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {}",
            self.id,
            self.day,
            self.direction,
            format_amount(self.amount)
        )
    }
}
