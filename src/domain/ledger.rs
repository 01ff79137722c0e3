use super::{Amount, Direction, Transaction};

/// Sum of amounts for transactions moving in the given direction.
/// Returns 0 when nothing matches.
pub fn sum_by_direction<'a, D: 'a>(
    transactions: impl IntoIterator<Item = &'a Transaction<D>>,
    direction: Direction,
) -> Amount {
    transactions
        .into_iter()
        .filter(|t| t.direction == direction)
        .fold(0.0, |total, t| total + t.amount)
}

/// Compute the balance as of a day.
/// Balance = sum of inflows up to and including `date` - sum of outflows up to `date`
pub fn compute_balance_as_of<'a, D: PartialOrd + 'a>(
    transactions: impl IntoIterator<Item = &'a Transaction<D>>,
    date: &D,
) -> Amount {
    let (inflow, outflow) = flows_as_of(transactions, date);
    inflow - outflow
}

/// Totals `(inflow, outflow)` up to and including `date`.
pub fn flows_as_of<'a, D: PartialOrd + 'a>(
    transactions: impl IntoIterator<Item = &'a Transaction<D>>,
    date: &D,
) -> (Amount, Amount) {
    transactions
        .into_iter()
        .filter(|t| t.day <= *date)
        .fold((0.0, 0.0), |(inflow, outflow), t| match t.direction {
            Direction::Inflow => (inflow + t.amount, outflow),
            Direction::Outflow => (inflow, outflow + t.amount),
        })
}

/// Sum of all amounts with a day in `[start, end]`, regardless of direction.
pub fn sum_in_range<'a, D: PartialOrd + 'a>(
    transactions: impl IntoIterator<Item = &'a Transaction<D>>,
    start: &D,
    end: &D,
) -> Amount {
    transactions
        .into_iter()
        .filter(|t| t.is_within(start, end))
        .fold(0.0, |total, t| total + t.amount)
}

/// Order transactions by amount, largest first. The sort is stable so equal
/// amounts keep their incoming order.
pub fn sort_by_amount_desc<D>(transactions: &mut [Transaction<D>]) {
    transactions.sort_by(|a, b| b.amount.total_cmp(&a.amount));
}
