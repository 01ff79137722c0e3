//! Cashbook keeps an in-memory ledger of inflows and outflows and answers
//! sums, balances and filtered listings over it from a console menu.

pub mod application;
pub mod cli;
pub mod domain;

pub use application::{Ledger, LedgerError};
pub use domain::*;
