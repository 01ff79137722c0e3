use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{Amount, Direction, HistoryEntry, Transaction};

#[derive(Debug, Clone, Serialize)]
pub struct DirectionReport<D = NaiveDate> {
    pub direction: Direction,
    pub total: Amount,
    pub count: usize,
    /// Largest amount first
    pub transactions: Vec<Transaction<D>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangeReport<D = NaiveDate> {
    pub start: D,
    pub end: D,
    pub total: Amount,
    pub transactions: Vec<Transaction<D>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceReport<D = NaiveDate> {
    pub as_of: D,
    pub inflow: Amount,
    pub outflow: Amount,
    pub balance: Amount,
}

/// Everything the `demo` command prints, in the order it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct WalkthroughReport<D = NaiveDate> {
    pub inflows: DirectionReport<D>,
    pub outflows: DirectionReport<D>,
    pub range: RangeReport<D>,
    pub balance: BalanceReport<D>,
    pub after_update: Vec<Transaction<D>>,
    pub after_delete: Vec<Transaction<D>>,
    pub history: Vec<HistoryEntry<D>>,
}
