//! Run auditing.

pub mod ledger;
