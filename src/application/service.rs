use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::domain::{
    Amount, Direction, HistoryEntry, Transaction, TransactionId, compute_balance_as_of,
    flows_as_of, format_amount, is_valid_amount, sort_by_amount_desc, sum_by_direction,
    sum_in_range,
};

use super::{BalanceReport, DirectionReport, LedgerError, RangeReport};

/// In-memory cash book: the current transactions plus the log of bulk deletes.
/// This is the primary interface for any client (console menu, demo, tests).
///
/// Transactions are kept in id order, so every listing is reproducible.
#[derive(Debug, Clone)]
pub struct Ledger<D = NaiveDate> {
    transactions: BTreeMap<TransactionId, Transaction<D>>,
    history: Vec<HistoryEntry<D>>,
    next_id: TransactionId,
}

impl<D> Default for Ledger<D> {
    fn default() -> Self {
        Self {
            transactions: BTreeMap::new(),
            history: Vec::new(),
            next_id: 1,
        }
    }
}

fn validate_amount(amount: Amount) -> Result<(), LedgerError> {
    if !is_valid_amount(amount) {
        return Err(LedgerError::InvalidTransaction(format!(
            "amount must be a non-negative number, got {}",
            amount
        )));
    }
    Ok(())
}

impl<D> Ledger<D> {
    /// Create an empty ledger. Ids start at 1.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction<D>> {
        self.transactions.get(&id)
    }

    /// All current transactions in id order.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction<D>> {
        self.transactions.values()
    }

    /// The bulk-delete log in the order the deletes ran.
    pub fn history(&self) -> &[HistoryEntry<D>] {
        &self.history
    }
}

impl<D: Ord + Clone + fmt::Display> Ledger<D> {
    // ========================
    // Mutations
    // ========================

    /// Record a new transaction and return its id.
    pub fn add(
        &mut self,
        day: D,
        amount: Amount,
        direction: Direction,
    ) -> Result<TransactionId, LedgerError> {
        if let Err(err) = validate_amount(amount) {
            warn!(%day, amount, %direction, "rejected transaction");
            return Err(err);
        }

        let id = self.next_id;
        self.next_id += 1;

        debug!(id, %day, amount, %direction, "transaction added");
        self.transactions
            .insert(id, Transaction::new(id, day, amount, direction));

        Ok(id)
    }

    /// Replace the fields of the transaction matching the old triple.
    ///
    /// When several transactions share the old triple the one with the
    /// lowest id is updated. The id itself never changes.
    pub fn update(
        &mut self,
        old: (D, Amount, Direction),
        new: (D, Amount, Direction),
    ) -> Result<TransactionId, LedgerError> {
        let (old_day, old_amount, old_direction) = old;
        let (new_day, new_amount, new_direction) = new;

        if let Err(err) = validate_amount(new_amount) {
            warn!(%new_day, new_amount, %new_direction, "rejected update");
            return Err(err);
        }

        let Some(transaction) = self
            .transactions
            .values_mut()
            .find(|t| t.matches(&old_day, old_amount, old_direction))
        else {
            warn!(%old_day, old_amount, %old_direction, "update target not found");
            return Err(LedgerError::NotFound(format!(
                "{} {} {}",
                old_day,
                old_direction,
                format_amount(old_amount)
            )));
        };

        transaction.day = new_day;
        transaction.amount = new_amount;
        transaction.direction = new_direction;

        debug!(id = transaction.id, "transaction updated");
        Ok(transaction.id)
    }

    /// Remove every transaction on `day`. Always logs a history entry.
    /// Returns how many transactions were removed.
    pub fn delete_by_day(&mut self, day: &D) -> usize {
        let before = self.transactions.len();
        self.transactions.retain(|_, t| t.day != *day);
        let removed = before - self.transactions.len();

        self.history
            .push(HistoryEntry::DeleteByDay { day: day.clone() });

        debug!(%day, removed, "deleted transactions by day");
        removed
    }

    /// Remove every transaction with a day in `[start, end]`. Always logs a
    /// history entry, even for an inverted range that removes nothing.
    pub fn delete_by_range(&mut self, start: &D, end: &D) -> usize {
        let before = self.transactions.len();
        self.transactions.retain(|_, t| !t.is_within(start, end));
        let removed = before - self.transactions.len();

        self.history.push(HistoryEntry::DeleteByRange {
            start: start.clone(),
            end: end.clone(),
        });

        debug!(%start, %end, removed, "deleted transactions by range");
        removed
    }

    // ========================
    // Queries
    // ========================

    /// Transactions moving in `direction`, in id order. Does not mutate.
    pub fn filter_by_direction(&self, direction: Direction) -> Vec<Transaction<D>> {
        self.select(|t| t.direction == direction)
    }

    pub fn sum_by_direction(&self, direction: Direction) -> Amount {
        sum_by_direction(self.transactions.values(), direction)
    }

    /// Inflows minus outflows for every transaction on or before `date`.
    pub fn balance_as_of(&self, date: &D) -> Amount {
        compute_balance_as_of(self.transactions.values(), date)
    }

    /// Transactions moving in `direction`, largest amount first. Ties keep id order.
    pub fn sorted_by_direction(&self, direction: Direction) -> Vec<Transaction<D>> {
        let mut selected = self.filter_by_direction(direction);
        sort_by_amount_desc(&mut selected);
        selected
    }

    /// Transactions with a day in `[start, end]`.
    pub fn in_range(&self, start: &D, end: &D) -> Vec<Transaction<D>> {
        self.select(|t| t.is_within(start, end))
    }

    pub fn sum_in_range(&self, start: &D, end: &D) -> Amount {
        sum_in_range(self.transactions.values(), start, end)
    }

    /// Transactions with an amount strictly greater than `amount`.
    pub fn larger_than(&self, amount: Amount) -> Vec<Transaction<D>> {
        self.select(|t| t.amount > amount)
    }

    /// Transactions strictly before `day` with an amount strictly greater than `amount`.
    pub fn before_day_larger_than(&self, day: &D, amount: Amount) -> Vec<Transaction<D>> {
        self.select(|t| t.day < *day && t.amount > amount)
    }

    fn select(&self, predicate: impl Fn(&Transaction<D>) -> bool) -> Vec<Transaction<D>> {
        self.transactions
            .values()
            .filter(|&t| predicate(t))
            .cloned()
            .collect()
    }

    // ========================
    // Reports
    // ========================

    pub fn direction_report(&self, direction: Direction) -> DirectionReport<D> {
        let transactions = self.sorted_by_direction(direction);
        DirectionReport {
            direction,
            total: self.sum_by_direction(direction),
            count: transactions.len(),
            transactions,
        }
    }

    pub fn range_report(&self, start: &D, end: &D) -> RangeReport<D> {
        RangeReport {
            start: start.clone(),
            end: end.clone(),
            total: self.sum_in_range(start, end),
            transactions: self.in_range(start, end),
        }
    }

    pub fn balance_report(&self, date: &D) -> BalanceReport<D> {
        let (inflow, outflow) = flows_as_of(self.transactions.values(), date);
        BalanceReport {
            as_of: date.clone(),
            inflow,
            outflow,
            balance: inflow - outflow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let mut ledger: Ledger<u32> = Ledger::new();

        assert_eq!(ledger.add(1, 10.0, Direction::Inflow), Ok(1));
        assert_eq!(ledger.add(1, 20.0, Direction::Outflow), Ok(2));
        assert_eq!(ledger.add(2, 30.0, Direction::Inflow), Ok(3));
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut ledger: Ledger<u32> = Ledger::new();
        ledger.add(1, 10.0, Direction::Inflow).unwrap();
        ledger.add(1, 20.0, Direction::Inflow).unwrap();

        assert_eq!(ledger.delete_by_day(&1), 2);
        assert!(ledger.is_empty());

        assert_eq!(ledger.add(1, 30.0, Direction::Inflow), Ok(3));
    }

    #[test]
    fn test_rejected_add_does_not_consume_an_id() {
        let mut ledger: Ledger<u32> = Ledger::new();

        assert!(ledger.add(1, -5.0, Direction::Inflow).is_err());
        assert_eq!(ledger.add(1, 5.0, Direction::Inflow), Ok(1));
    }

    #[test]
    fn test_zero_amount_is_valid() {
        let mut ledger: Ledger<u32> = Ledger::new();
        assert!(ledger.add(1, 0.0, Direction::Outflow).is_ok());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_non_finite_amount_is_rejected() {
        let mut ledger: Ledger<u32> = Ledger::new();

        assert!(matches!(
            ledger.add(1, f64::NAN, Direction::Inflow),
            Err(LedgerError::InvalidTransaction(_))
        ));
        assert!(matches!(
            ledger.add(1, f64::INFINITY, Direction::Inflow),
            Err(LedgerError::InvalidTransaction(_))
        ));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_update_keeps_id() {
        let mut ledger: Ledger<u32> = Ledger::new();
        let id = ledger.add(2, 2000.0, Direction::Outflow).unwrap();

        let updated = ledger
            .update((2, 2000.0, Direction::Outflow), (3, 1800.0, Direction::Inflow))
            .unwrap();

        assert_eq!(updated, id);
        let transaction = ledger.get(id).unwrap();
        assert_eq!(transaction.day, 3);
        assert_eq!(transaction.amount, 1800.0);
        assert_eq!(transaction.direction, Direction::Inflow);
    }

    #[test]
    fn test_update_picks_lowest_id_on_duplicate_triple() {
        let mut ledger: Ledger<u32> = Ledger::new();
        let first = ledger.add(5, 100.0, Direction::Inflow).unwrap();
        let second = ledger.add(5, 100.0, Direction::Inflow).unwrap();

        ledger
            .update((5, 100.0, Direction::Inflow), (6, 100.0, Direction::Inflow))
            .unwrap();

        assert_eq!(ledger.get(first).unwrap().day, 6);
        assert_eq!(ledger.get(second).unwrap().day, 5);
    }

    #[test]
    fn test_update_validates_before_lookup() {
        let mut ledger: Ledger<u32> = Ledger::new();
        ledger.add(1, 100.0, Direction::Inflow).unwrap();

        // Target exists, but the replacement amount is invalid
        let result = ledger.update((1, 100.0, Direction::Inflow), (1, -1.0, Direction::Inflow));
        assert!(matches!(result, Err(LedgerError::InvalidTransaction(_))));
        assert_eq!(ledger.get(1).unwrap().amount, 100.0);

        // Neither exists nor valid: validation wins
        let result = ledger.update((9, 1.0, Direction::Inflow), (1, -1.0, Direction::Inflow));
        assert!(matches!(result, Err(LedgerError::InvalidTransaction(_))));
    }

    #[test]
    fn test_not_found_message_names_the_triple() {
        let mut ledger: Ledger<u32> = Ledger::new();
        let err = ledger
            .update((4, 12.5, Direction::Outflow), (4, 13.0, Direction::Outflow))
            .unwrap_err();

        assert_eq!(err.to_string(), "Transaction not found: 4 outflow 12.50");
    }

    #[test]
    fn test_filter_by_direction_does_not_mutate() {
        let mut ledger: Ledger<u32> = Ledger::new();
        ledger.add(1, 10.0, Direction::Inflow).unwrap();
        ledger.add(2, 20.0, Direction::Outflow).unwrap();

        let outflows = ledger.filter_by_direction(Direction::Outflow);

        assert_eq!(outflows.len(), 1);
        assert_eq!(outflows[0].amount, 20.0);
        assert_eq!(ledger.len(), 2);
        assert!(ledger.history().is_empty());
    }

    #[test]
    fn test_larger_than_is_strict() {
        let mut ledger: Ledger<u32> = Ledger::new();
        ledger.add(1, 500.0, Direction::Inflow).unwrap();
        ledger.add(2, 501.0, Direction::Outflow).unwrap();

        let large = ledger.larger_than(500.0);
        assert_eq!(large.len(), 1);
        assert_eq!(large[0].amount, 501.0);
    }

    #[test]
    fn test_before_day_larger_than_is_strict_on_both() {
        let mut ledger: Ledger<u32> = Ledger::new();
        ledger.add(1, 100.0, Direction::Inflow).unwrap(); // too small
        ledger.add(2, 300.0, Direction::Outflow).unwrap(); // match
        ledger.add(3, 300.0, Direction::Inflow).unwrap(); // same day, excluded

        let found = ledger.before_day_larger_than(&3, 100.0);
        let ids: Vec<_> = found.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_reports() {
        let mut ledger: Ledger<u32> = Ledger::new();
        ledger.add(1, 1000.0, Direction::Inflow).unwrap();
        ledger.add(3, 1500.0, Direction::Inflow).unwrap();
        ledger.add(2, 2000.0, Direction::Outflow).unwrap();

        let inflows = ledger.direction_report(Direction::Inflow);
        assert_eq!(inflows.total, 2500.0);
        assert_eq!(inflows.count, 2);
        assert_eq!(inflows.transactions[0].amount, 1500.0);

        let range = ledger.range_report(&2, &3);
        assert_eq!(range.total, 3500.0);
        assert_eq!(range.transactions.len(), 2);

        let balance = ledger.balance_report(&2);
        assert_eq!(balance.inflow, 1000.0);
        assert_eq!(balance.outflow, 2000.0);
        assert_eq!(balance.balance, -1000.0);
    }

    #[test]
    fn test_balance_report_agrees_with_balance_as_of() {
        let mut ledger: Ledger<u32> = Ledger::new();
        ledger.add(1, 0.1, Direction::Inflow).unwrap();
        ledger.add(1, 0.3, Direction::Outflow).unwrap();
        ledger.add(1, 0.2, Direction::Inflow).unwrap();

        let report = ledger.balance_report(&1);

        assert_eq!(report.balance, report.inflow - report.outflow);
        assert_eq!(ledger.balance_as_of(&1), report.balance);
        assert_eq!(ledger.balance_as_of(&1), (0.1 + 0.2) - 0.3);
    }
}
