use std::fmt;
use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use super::{DAY_FORMAT, parse_day};
use crate::application::{Ledger, LedgerError};
use crate::domain::{Amount, Direction, Transaction, format_amount, parse_amount};

/// The eleven entries of the console menu, numbered as printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Add,
    Update,
    DeleteByDay,
    DeleteByRange,
    ShowByDirection,
    SearchLarge,
    SearchBeforeDay,
    SumByDirection,
    BalanceAsOf,
    SortedByDirection,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 11] = [
        MenuOption::Add,
        MenuOption::Update,
        MenuOption::DeleteByDay,
        MenuOption::DeleteByRange,
        MenuOption::ShowByDirection,
        MenuOption::SearchLarge,
        MenuOption::SearchBeforeDay,
        MenuOption::SumByDirection,
        MenuOption::BalanceAsOf,
        MenuOption::SortedByDirection,
        MenuOption::Exit,
    ];

    pub fn number(&self) -> usize {
        match self {
            MenuOption::Add => 1,
            MenuOption::Update => 2,
            MenuOption::DeleteByDay => 3,
            MenuOption::DeleteByRange => 4,
            MenuOption::ShowByDirection => 5,
            MenuOption::SearchLarge => 6,
            MenuOption::SearchBeforeDay => 7,
            MenuOption::SumByDirection => 8,
            MenuOption::BalanceAsOf => 9,
            MenuOption::SortedByDirection => 10,
            MenuOption::Exit => 11,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::Add => "Add transaction",
            MenuOption::Update => "Update transaction",
            MenuOption::DeleteByDay => "Delete transactions on a day",
            MenuOption::DeleteByRange => "Delete transactions in a period",
            MenuOption::ShowByDirection => "Show transactions by direction",
            MenuOption::SearchLarge => "Find transactions above an amount",
            MenuOption::SearchBeforeDay => "Find transactions before a day above an amount",
            MenuOption::SumByDirection => "Total amount by direction",
            MenuOption::BalanceAsOf => "Balance as of a date",
            MenuOption::SortedByDirection => "List transactions by direction, largest first",
            MenuOption::Exit => "Exit",
        }
    }

    /// Match a selection line against the literal option numbers "1".."11".
    /// The line ending is already stripped; any other whitespace is a mismatch.
    pub fn from_choice(choice: &str) -> Option<Self> {
        MenuOption::ALL
            .into_iter()
            .find(|option| option.number().to_string() == choice)
    }
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

/// Why a single menu iteration did not complete.
#[derive(Error, Debug)]
pub enum MenuError {
    #[error("{0}")]
    Input(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("end of input")]
    EndOfInput,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Line-oriented console over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu until the exit option is chosen or input ends.
    /// Input and ledger errors are reported and the loop continues;
    /// only I/O failures end it with an error.
    pub fn run(&mut self, ledger: &mut Ledger) -> io::Result<()> {
        loop {
            self.print_menu()?;

            let Some(choice) = self.prompt("Choose an option (1-11): ")? else {
                debug!("input closed, leaving menu");
                break;
            };

            let Some(option) = MenuOption::from_choice(&choice) else {
                writeln!(
                    self.output,
                    "Invalid option '{}', please choose a number from 1 to 11.",
                    choice
                )?;
                continue;
            };

            if option == MenuOption::Exit {
                writeln!(self.output, "Exiting.")?;
                break;
            }

            debug!(option = option.number(), "menu option selected");
            match self.dispatch(option, ledger) {
                Ok(()) => {}
                Err(MenuError::EndOfInput) => {
                    debug!("input closed mid-operation, leaving menu");
                    break;
                }
                Err(MenuError::Io(err)) => return Err(err),
                Err(err) => {
                    debug!(error = %err, "menu operation failed");
                    writeln!(self.output, "{}", err)?;
                }
            }
        }

        self.output.flush()
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Menu:")?;
        for option in MenuOption::ALL {
            writeln!(self.output, "{}", option)?;
        }
        Ok(())
    }

    /// Print a prompt and read one line. `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn read_field(&mut self, prompt: &str) -> Result<String, MenuError> {
        self.prompt(prompt)?.ok_or(MenuError::EndOfInput)
    }

    fn dispatch(&mut self, option: MenuOption, ledger: &mut Ledger) -> Result<(), MenuError> {
        match option {
            MenuOption::Add => {
                // Every field is read before any is parsed, so a bad value
                // never leaves unread answers behind for the menu prompt.
                let day = self.read_field("Day (YYYY-MM-DD): ")?;
                let amount = self.read_field("Amount: ")?;
                let direction = self.read_field("Direction (inflow/outflow): ")?;

                let id = ledger.add(
                    to_day(&day)?,
                    to_amount(&amount)?,
                    to_direction(&direction)?,
                )?;
                writeln!(self.output, "Transaction #{} added.", id)?;
            }

            MenuOption::Update => {
                let old_day = self.read_field("Old day (YYYY-MM-DD): ")?;
                let old_amount = self.read_field("Old amount: ")?;
                let old_direction = self.read_field("Old direction (inflow/outflow): ")?;
                let new_day = self.read_field("New day (YYYY-MM-DD): ")?;
                let new_amount = self.read_field("New amount: ")?;
                let new_direction = self.read_field("New direction (inflow/outflow): ")?;

                let id = ledger.update(
                    (
                        to_day(&old_day)?,
                        to_amount(&old_amount)?,
                        to_direction(&old_direction)?,
                    ),
                    (
                        to_day(&new_day)?,
                        to_amount(&new_amount)?,
                        to_direction(&new_direction)?,
                    ),
                )?;
                writeln!(self.output, "Transaction #{} updated.", id)?;
            }

            MenuOption::DeleteByDay => {
                let day = to_day(&self.read_field("Day (YYYY-MM-DD): ")?)?;

                let removed = ledger.delete_by_day(&day);
                writeln!(
                    self.output,
                    "Deleted {} transaction(s) on {}.",
                    removed,
                    day.format(DAY_FORMAT)
                )?;
            }

            MenuOption::DeleteByRange => {
                let start = self.read_field("Start day (YYYY-MM-DD): ")?;
                let end = self.read_field("End day (YYYY-MM-DD): ")?;
                let (start, end) = (to_day(&start)?, to_day(&end)?);

                let removed = ledger.delete_by_range(&start, &end);
                writeln!(
                    self.output,
                    "Deleted {} transaction(s) from {} to {}.",
                    removed,
                    start.format(DAY_FORMAT),
                    end.format(DAY_FORMAT)
                )?;
            }

            MenuOption::ShowByDirection => {
                let direction = to_direction(&self.read_field("Direction (inflow/outflow): ")?)?;

                let transactions = ledger.filter_by_direction(direction);
                writeln!(self.output, "Transactions with direction '{}':", direction)?;
                write_transactions(&mut self.output, &transactions)?;
            }

            MenuOption::SearchLarge => {
                let amount = to_amount(&self.read_field("Amount threshold: ")?)?;

                let transactions = ledger.larger_than(amount);
                writeln!(
                    self.output,
                    "Transactions larger than {}:",
                    format_amount(amount)
                )?;
                write_transactions(&mut self.output, &transactions)?;
            }

            MenuOption::SearchBeforeDay => {
                let day = self.read_field("Day (YYYY-MM-DD): ")?;
                let amount = self.read_field("Amount threshold: ")?;
                let (day, amount) = (to_day(&day)?, to_amount(&amount)?);

                let transactions = ledger.before_day_larger_than(&day, amount);
                writeln!(
                    self.output,
                    "Transactions before {} larger than {}:",
                    day.format(DAY_FORMAT),
                    format_amount(amount)
                )?;
                write_transactions(&mut self.output, &transactions)?;
            }

            MenuOption::SumByDirection => {
                let direction = to_direction(&self.read_field("Direction (inflow/outflow): ")?)?;

                let total = ledger.sum_by_direction(direction);
                writeln!(
                    self.output,
                    "Total of '{}' transactions: {}",
                    direction,
                    format_amount(total)
                )?;
            }

            MenuOption::BalanceAsOf => {
                let date = to_day(&self.read_field("Date (YYYY-MM-DD): ")?)?;

                let balance = ledger.balance_as_of(&date);
                writeln!(
                    self.output,
                    "Balance as of {}: {}",
                    date.format(DAY_FORMAT),
                    format_amount(balance)
                )?;
            }

            MenuOption::SortedByDirection => {
                let direction = to_direction(&self.read_field("Direction (inflow/outflow): ")?)?;

                let transactions = ledger.sorted_by_direction(direction);
                writeln!(
                    self.output,
                    "Transactions with direction '{}', largest first:",
                    direction
                )?;
                write_transactions(&mut self.output, &transactions)?;
            }

            MenuOption::Exit => {}
        }

        Ok(())
    }
}

fn to_day(input: &str) -> Result<NaiveDate, MenuError> {
    parse_day(input)
        .map_err(|_| MenuError::Input(format!("Invalid day '{}'. Use YYYY-MM-DD", input.trim())))
}

fn to_amount(input: &str) -> Result<Amount, MenuError> {
    parse_amount(input).map_err(|e| MenuError::Input(format!("Invalid amount: {}", e)))
}

fn to_direction(input: &str) -> Result<Direction, MenuError> {
    let direction: Direction = input.parse().map_err(LedgerError::from)?;
    Ok(direction)
}

/// Render transactions as a fixed-width table.
pub fn write_transactions(
    out: &mut impl Write,
    transactions: &[Transaction<NaiveDate>],
) -> io::Result<()> {
    if transactions.is_empty() {
        return writeln!(out, "No transactions found.");
    }

    writeln!(
        out,
        "{:<6} {:<12} {:<10} {:>12}",
        "ID", "DAY", "DIRECTION", "AMOUNT"
    )?;
    writeln!(out, "{}", "-".repeat(43))?;
    for t in transactions {
        writeln!(
            out,
            "{:<6} {:<12} {:<10} {:>12}",
            t.id,
            t.day.format(DAY_FORMAT).to_string(),
            t.direction.as_str(),
            format_amount(t.amount)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_choice_matches_numbers() {
        assert_eq!(MenuOption::from_choice("1"), Some(MenuOption::Add));
        assert_eq!(MenuOption::from_choice("10"), Some(MenuOption::SortedByDirection));
        assert_eq!(MenuOption::from_choice("11"), Some(MenuOption::Exit));
        assert_eq!(MenuOption::from_choice(" 11 "), None);
        assert_eq!(MenuOption::from_choice("0"), None);
        assert_eq!(MenuOption::from_choice("12"), None);
        assert_eq!(MenuOption::from_choice("01"), None);
        assert_eq!(MenuOption::from_choice("add"), None);
    }

    #[test]
    fn test_options_are_numbered_in_order() {
        for (index, option) in MenuOption::ALL.iter().enumerate() {
            assert_eq!(option.number(), index + 1);
        }
    }

    #[test]
    fn test_menu_line_format() {
        assert_eq!(MenuOption::Exit.to_string(), "11. Exit");
    }

    #[test]
    fn test_write_transactions_empty() {
        let mut out = Vec::new();
        write_transactions(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No transactions found.\n");
    }

    #[test]
    fn test_write_transactions_table() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let mut out = Vec::new();
        write_transactions(&mut out, &[Transaction::new(3, day, 2000.0, Direction::Outflow)])
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let row = text.lines().nth(2).unwrap();
        assert!(row.starts_with("3      2024-01-02   outflow"));
        assert!(row.ends_with("2000.00"));
    }
}
