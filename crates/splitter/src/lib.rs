//! Order ledger and the pure bill-splitting arithmetic.

pub mod calculator;
pub mod ledger;
pub mod policy;

pub use calculator::{
    split, subtotal, tax_and_tip_per_friend, tip_amount, total_with_tip_and_tax, SplitBreakdown,
};
pub use ledger::Ledger;
