//! Error types for the payment processors
//!
//! This module defines every error that can be raised below the
//! `PaymentProcessor` contract. None of them cross it: processors turn them
//! into a `false` return or a sentinel status string and log them.
//!
//! # Error Categories
//!
//! - **Gateway Errors**: argument validation failures raised by the external gateway
//! - **Ledger Errors**: invalid amounts and forbidden status transitions
//! - **Adapter Errors**: unknown transactions, amount conversion, declined completion

use crate::types::TransactionStatus;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the payment processors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaymentError {
    /// A gateway call received a malformed argument
    ///
    /// Raised by authorize, complete and refund. Never raised by status checks.
    #[error("Invalid argument '{param}': {message}")]
    InvalidArgument {
        /// Name of the offending parameter
        param: String,
        /// What was wrong with it
        message: String,
    },

    /// Amount cannot be recorded
    #[error("Invalid amount {amount}: {reason}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
        /// Why it was rejected
        reason: String,
    },

    /// Amount has no floating point representation for the gateway
    #[error("Amount {amount} cannot be converted for the gateway")]
    AmountNotRepresentable {
        /// The amount that failed to convert
        amount: Decimal,
    },

    /// Status change that would move a transaction backwards
    #[error("Invalid status transition {from} -> {to}")]
    InvalidTransition {
        /// Status before the attempted change
        from: TransactionStatus,
        /// Requested status
        to: TransactionStatus,
    },

    /// Transaction id is unknown to this processor
    #[error("Transaction {tx} not found for {operation}")]
    TransactionNotFound {
        /// Transaction ID that was not found
        tx: String,
        /// Operation that failed
        operation: String,
    },

    /// Gateway accepted the authorization but refused to complete it
    #[error("Gateway declined to complete authorization {token}")]
    CompletionDeclined {
        /// Authorization token left pending at the gateway
        token: String,
    },
}

// Helper functions for creating common errors

impl PaymentError {
    /// Create an InvalidArgument error
    pub fn invalid_argument(param: &str, message: &str) -> Self {
        PaymentError::InvalidArgument {
            param: param.to_string(),
            message: message.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal, reason: &str) -> Self {
        PaymentError::InvalidAmount {
            amount,
            reason: reason.to_string(),
        }
    }

    /// Create an AmountNotRepresentable error
    pub fn amount_not_representable(amount: Decimal) -> Self {
        PaymentError::AmountNotRepresentable { amount }
    }

    /// Create an InvalidTransition error
    pub fn invalid_transition(from: TransactionStatus, to: TransactionStatus) -> Self {
        PaymentError::InvalidTransition { from, to }
    }

    /// Create a TransactionNotFound error
    pub fn transaction_not_found(tx: &str, operation: &str) -> Self {
        PaymentError::TransactionNotFound {
            tx: tx.to_string(),
            operation: operation.to_string(),
        }
    }

    /// Create a CompletionDeclined error
    pub fn completion_declined(token: &str) -> Self {
        PaymentError::CompletionDeclined {
            token: token.to_string(),
        }
    }

    /// Whether this error came from gateway argument validation
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, PaymentError::InvalidArgument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::invalid_argument(
        PaymentError::InvalidArgument { param: "email".to_string(), message: "Email address is required".to_string() },
        "Invalid argument 'email': Email address is required"
    )]
    #[case::invalid_amount(
        PaymentError::InvalidAmount { amount: dec!(-5.00), reason: "amount must not be negative".to_string() },
        "Invalid amount -5.00: amount must not be negative"
    )]
    #[case::amount_not_representable(
        PaymentError::AmountNotRepresentable { amount: dec!(1.5) },
        "Amount 1.5 cannot be converted for the gateway"
    )]
    #[case::invalid_transition(
        PaymentError::InvalidTransition { from: TransactionStatus::Pending, to: TransactionStatus::Refunded },
        "Invalid status transition PENDING -> REFUNDED"
    )]
    #[case::transaction_not_found(
        PaymentError::TransactionNotFound { tx: "TXN1234".to_string(), operation: "refund".to_string() },
        "Transaction TXN1234 not found for refund"
    )]
    #[case::completion_declined(
        PaymentError::CompletionDeclined { token: "tok".to_string() },
        "Gateway declined to complete authorization tok"
    )]
    fn test_error_display(#[case] error: PaymentError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::invalid_argument(
        PaymentError::invalid_argument("token", "Invalid authorization token"),
        PaymentError::InvalidArgument { param: "token".to_string(), message: "Invalid authorization token".to_string() }
    )]
    #[case::transaction_not_found(
        PaymentError::transaction_not_found("CC12345678", "status"),
        PaymentError::TransactionNotFound { tx: "CC12345678".to_string(), operation: "status".to_string() }
    )]
    #[case::invalid_transition(
        PaymentError::invalid_transition(TransactionStatus::Refunded, TransactionStatus::Completed),
        PaymentError::InvalidTransition { from: TransactionStatus::Refunded, to: TransactionStatus::Completed }
    )]
    fn test_helper_functions(#[case] result: PaymentError, #[case] expected: PaymentError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_is_invalid_argument() {
        assert!(PaymentError::invalid_argument("amount", "must be positive").is_invalid_argument());
        assert!(!PaymentError::completion_declined("tok").is_invalid_argument());
    }
}
