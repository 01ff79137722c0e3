// Application layer - the ledger state owner and its reports.
// The console menu talks to `Ledger` directly; nothing here knows about it.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
