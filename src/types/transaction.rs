//! Transaction-related types for the payment processors
//!
//! This module defines the identifiers, the ledger-level transaction status and
//! the transaction record kept by the direct processor's ledger.

use crate::types::PaymentError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use uuid::Uuid;

/// Customer identifier as supplied by client code
pub type CustomerId = String;

/// Contract-level transaction identifier
///
/// Minted by a processor on a successful payment. Opaque to callers.
pub type TransactionId = String;

/// Mint a short random identifier such as `CC1a2b3c4d`
///
/// The suffix is the first 8 hex digits of a v4 UUID.
pub fn generate_id(prefix: &str) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix, &uuid[..8])
}

/// Lifecycle of a ledger transaction
///
/// A record only ever moves forward: `Pending -> Completed -> Refunded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionStatus {
    /// Accepted but not yet settled
    Pending,

    /// Settled, funds captured
    Completed,

    /// Fully or partially returned to the customer
    Refunded,
}

impl TransactionStatus {
    /// Whether moving from `self` to `next` is a valid forward step
    ///
    /// `Refunded -> Refunded` is allowed: a second refund replaces the recorded
    /// refund details without changing the status.
    pub fn can_transition_to(self, next: TransactionStatus) -> bool {
        matches!(
            (self, next),
            (TransactionStatus::Pending, TransactionStatus::Completed)
                | (TransactionStatus::Completed, TransactionStatus::Refunded)
                | (TransactionStatus::Refunded, TransactionStatus::Refunded)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Refunded => "REFUNDED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single payment as recorded in a processor's ledger
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// The customer that paid
    pub customer_id: CustomerId,

    /// Amount charged, never negative
    pub amount: Decimal,

    /// When the payment was recorded
    pub created_at: DateTime<Utc>,

    /// Current lifecycle status
    pub status: TransactionStatus,

    /// Amount returned by the latest refund
    ///
    /// Always `Some` once the status is `Refunded`.
    pub refund_amount: Option<Decimal>,

    /// When the latest refund was recorded
    ///
    /// Always `Some` once the status is `Refunded`.
    pub refunded_at: Option<DateTime<Utc>>,
}

impl TransactionRecord {
    /// Create a record in the `Pending` state
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::InvalidAmount` if `amount` is negative.
    pub fn pending(customer_id: &str, amount: Decimal) -> Result<Self, PaymentError> {
        if amount < Decimal::ZERO {
            return Err(PaymentError::invalid_amount(amount, "amount must not be negative"));
        }

        Ok(TransactionRecord {
            customer_id: customer_id.to_string(),
            amount,
            created_at: Utc::now(),
            status: TransactionStatus::Pending,
            refund_amount: None,
            refunded_at: None,
        })
    }

    /// Create a record that settled immediately
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::InvalidAmount` if `amount` is negative.
    pub fn completed(customer_id: &str, amount: Decimal) -> Result<Self, PaymentError> {
        let mut record = Self::pending(customer_id, amount)?;
        record.transition(TransactionStatus::Completed)?;
        Ok(record)
    }

    /// Record a refund of `amount`
    ///
    /// Sets the status to `Refunded` along with the refund amount and time.
    /// The amount is not checked against the original charge.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::InvalidTransition` if the record is still pending.
    pub fn mark_refunded(&mut self, amount: Decimal) -> Result<(), PaymentError> {
        self.transition(TransactionStatus::Refunded)?;
        self.refund_amount = Some(amount);
        self.refunded_at = Some(Utc::now());
        Ok(())
    }

    fn transition(&mut self, next: TransactionStatus) -> Result<(), PaymentError> {
        if !self.status.can_transition_to(next) {
            return Err(PaymentError::invalid_transition(self.status, next));
        }
        self.status = next;
        Ok(())
    }
}
