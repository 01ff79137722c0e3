// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::io::Cursor;

use anyhow::Result;
use cashbook::cli::Console;
use cashbook::{Direction, Ledger};
use chrono::NaiveDate;

/// Helper to parse a date string into a NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Test fixture: the four-transaction ledger keyed by day numbers.
///
/// | id | day | amount | direction |
/// |----|-----|--------|-----------|
/// | 1  | 1   | 1000   | inflow    |
/// | 2  | 3   | 1500   | inflow    |
/// | 3  | 2   | 2000   | outflow   |
/// | 4  | 4   | 500    | outflow   |
pub fn sample_ledger() -> Result<Ledger<u32>> {
    let mut ledger = Ledger::new();
    ledger.add(1, 1000.0, Direction::Inflow)?;
    ledger.add(3, 1500.0, Direction::Inflow)?;
    ledger.add(2, 2000.0, Direction::Outflow)?;
    ledger.add(4, 500.0, Direction::Outflow)?;
    Ok(ledger)
}

/// Feed `lines` to the console menu and return everything it printed.
pub fn run_console(ledger: &mut Ledger, lines: &[&str]) -> Result<String> {
    let mut input = lines.join("\n");
    if !lines.is_empty() {
        input.push('\n');
    }

    let mut console = Console::new(Cursor::new(input), Vec::new());
    console.run(ledger)?;
    Ok(String::from_utf8(console.into_output())?)
}
