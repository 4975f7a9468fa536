//! Types module
//!
//! Contains core data structures used throughout the crate.
//! This module organizes types into logical submodules:
//! - `transaction`: Ledger transaction records, statuses and identifiers
//! - `error`: Error types raised below the processor contract

pub mod error;
pub mod transaction;

pub use error::PaymentError;
pub use transaction::{
    generate_id, CustomerId, TransactionId, TransactionRecord, TransactionStatus,
};
