use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use super::menu::write_transactions;
use super::{DAY_FORMAT, OutputFormat, parse_day};
use crate::application::{Ledger, WalkthroughReport};
use crate::domain::{Direction, format_amount};

fn day(input: &str) -> Result<NaiveDate> {
    parse_day(input).with_context(|| format!("Invalid demo day '{}'", input))
}

/// Build the sample ledger and run every query against it.
pub fn walkthrough() -> Result<WalkthroughReport> {
    let (first, second, third, fourth) = (
        day("2024-01-01")?,
        day("2024-01-02")?,
        day("2024-01-03")?,
        day("2024-01-04")?,
    );

    let mut ledger = Ledger::new();
    ledger.add(first, 1000.0, Direction::Inflow)?;
    ledger.add(third, 1500.0, Direction::Inflow)?;
    ledger.add(second, 2000.0, Direction::Outflow)?;
    ledger.add(fourth, 500.0, Direction::Outflow)?;

    let inflows = ledger.direction_report(Direction::Inflow);
    let outflows = ledger.direction_report(Direction::Outflow);
    let range = ledger.range_report(&second, &third);
    let balance = ledger.balance_report(&second);

    ledger.update(
        (second, 2000.0, Direction::Outflow),
        (third, 1800.0, Direction::Inflow),
    )?;
    let after_update = ledger.transactions().cloned().collect();

    ledger.delete_by_day(&third);
    let after_delete = ledger.transactions().cloned().collect();

    Ok(WalkthroughReport {
        inflows,
        outflows,
        range,
        balance,
        after_update,
        after_delete,
        history: ledger.history().to_vec(),
    })
}

pub fn run_demo(format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let report = walkthrough()?;

    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        OutputFormat::Table => {
            for direction in [&report.inflows, &report.outflows] {
                writeln!(
                    out,
                    "Total '{}': {} ({} transactions)",
                    direction.direction,
                    format_amount(direction.total),
                    direction.count
                )?;
            }
            writeln!(out)?;

            writeln!(out, "Inflows, largest first:")?;
            write_transactions(out, &report.inflows.transactions)?;
            writeln!(out)?;

            writeln!(
                out,
                "Transactions from {} to {} (total {}):",
                report.range.start.format(DAY_FORMAT),
                report.range.end.format(DAY_FORMAT),
                format_amount(report.range.total)
            )?;
            write_transactions(out, &report.range.transactions)?;
            writeln!(out)?;

            writeln!(
                out,
                "Balance as of {}: {} (in {}, out {})",
                report.balance.as_of.format(DAY_FORMAT),
                format_amount(report.balance.balance),
                format_amount(report.balance.inflow),
                format_amount(report.balance.outflow)
            )?;
            writeln!(out)?;

            writeln!(out, "After updating the outflow of 2000.00:")?;
            write_transactions(out, &report.after_update)?;
            writeln!(out)?;

            writeln!(out, "After deleting the third day:")?;
            write_transactions(out, &report.after_delete)?;
            writeln!(out)?;

            writeln!(out, "History:")?;
            for entry in &report.history {
                writeln!(out, "  {}", entry)?;
            }
        }
    }

    Ok(())
}
