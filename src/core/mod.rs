//! Core building blocks shared by the processors
//!
//! - `ledger` - In-memory transaction ledger owned by a processor
//! - `payer_directory` - Customer id to gateway payer id lookup

pub mod ledger;
pub mod payer_directory;

pub use ledger::TransactionLedger;
pub use payer_directory::{PayerDirectory, PayerMapping, DEFAULT_PAYER_DOMAIN};
