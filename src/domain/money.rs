use std::fmt;

/// Amounts are plain floating-point values. The ledger only requires them
/// to be finite and non-negative; no currency rounding is applied.
pub type Amount = f64;

/// Format an amount as a human-readable string with two decimals.
/// Example: 1500.0 -> "1500.00", -1000.0 -> "-1000.00"
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", amount)
}

/// Parse a decimal string into an amount.
/// Example: "50" -> 50.0, " 12.5 " -> 12.5, "-3" -> -3.0
///
/// Negative values parse fine; rejecting them is the ledger's job.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let amount: Amount = input
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat(input.to_string()))?;

    if !amount.is_finite() {
        return Err(ParseAmountError::NotFinite(input.to_string()));
    }

    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat(String),
    NotFinite(String),
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is empty"),
            ParseAmountError::InvalidFormat(s) => write!(f, "invalid amount format '{}'", s),
            ParseAmountError::NotFinite(s) => write!(f, "amount '{}' is not a finite number", s),
        }
    }
}

impl std::error::Error for ParseAmountError {}
