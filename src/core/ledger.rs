//! In-memory transaction ledger
//!
//! This module provides the `TransactionLedger` that keeps one
//! `TransactionRecord` per contract-level transaction id. Each processor owns
//! its own ledger; ledgers are never shared between processors.
//!
//! # Lifetime
//!
//! Records are appended on payment and mutated in place on refund. Nothing is
//! ever removed for the lifetime of the process.
//!
//! # Thread Safety
//!
//! The ledger is backed by a `DashMap`, so it can be used through a shared
//! reference from several threads. Updates to a single record run while holding
//! that record's shard lock.

use crate::types::{PaymentError, TransactionId, TransactionRecord, TransactionStatus};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::Decimal;

/// Ledger of transactions keyed by contract-level transaction id
#[derive(Debug, Default)]
pub struct TransactionLedger {
    /// Map of transaction ID to its record
    records: DashMap<TransactionId, TransactionRecord>,
}

impl TransactionLedger {
    /// Create a new empty ledger
    pub fn new() -> Self {
        TransactionLedger {
            records: DashMap::new(),
        }
    }

    /// Record a transaction
    ///
    /// If a record with the same ID already exists, the new one is ignored
    /// and `false` is returned.
    ///
    /// # Arguments
    ///
    /// * `tx_id` - The unique transaction identifier
    /// * `record` - The transaction data to store
    pub fn insert(&self, tx_id: TransactionId, record: TransactionRecord) -> bool {
        match self.records.entry(tx_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(record);
                true
            }
        }
    }

    /// Get a copy of a stored record
    ///
    /// The record is cloned so no lock is held after returning.
    pub fn get(&self, tx_id: &str) -> Option<TransactionRecord> {
        self.records.get(tx_id).map(|entry| entry.value().clone())
    }

    /// Current status of a stored record
    pub fn status(&self, tx_id: &str) -> Option<TransactionStatus> {
        self.records.get(tx_id).map(|entry| entry.status)
    }

    /// Whether a record exists for `tx_id`
    pub fn contains(&self, tx_id: &str) -> bool {
        self.records.contains_key(tx_id)
    }

    /// Mark a record as refunded
    ///
    /// The update runs while the record is locked, so it is atomic with
    /// respect to other callers.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::TransactionNotFound` for an unknown id and
    /// `PaymentError::InvalidTransition` if the record has not completed yet.
    pub fn mark_refunded(&self, tx_id: &str, amount: Decimal) -> Result<(), PaymentError> {
        match self.records.get_mut(tx_id) {
            Some(mut entry) => entry.value_mut().mark_refunded(amount),
            None => Err(PaymentError::transaction_not_found(tx_id, "refund")),
        }
    }

    /// Number of recorded transactions
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no transaction has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
