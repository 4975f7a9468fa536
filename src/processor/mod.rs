//! Uniform payment processing contract
//!
//! This module defines the `PaymentProcessor` trait that every payment method
//! implements, and a factory that picks an implementation at runtime. Client
//! code holds a `Box<dyn PaymentProcessor>` and never learns which
//! implementation is behind it.
//!
//! Two implementations exist:
//! - `DirectProcessor` - card payments recorded in its own ledger
//! - `GatewayAdapter` - payments bridged to the external gateway

use crate::core::PayerDirectory;
use crate::gateway::ExternalGateway;
use crate::logging::PaymentLogger;
use crate::types::TransactionId;
use clap::ValueEnum;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

pub mod adapter;
pub mod direct;

pub use adapter::GatewayAdapter;
pub use direct::DirectProcessor;

/// Available payment methods
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum PaymentMethod {
    CreditCard,
    #[value(name = "paypal")]
    PayPal,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::CreditCard => f.write_str("Credit Card"),
            PaymentMethod::PayPal => f.write_str("PayPal"),
        }
    }
}

/// Contract shared by every payment method
///
/// No method fails: absence of success is reported as `false` or as a
/// sentinel status string, and diagnostics go to the processor's logger.
/// Every method accepts identifiers this processor has never seen.
pub trait PaymentProcessor: Send + Sync {
    /// The payment method this processor implements
    fn method(&self) -> PaymentMethod;

    /// Charge `amount` to `customer_id`
    ///
    /// `amount` must not be negative. Returns `true` once the payment is
    /// recorded as completed.
    fn process_payment(&self, customer_id: &str, amount: Decimal) -> bool;

    /// Refund `amount` of a previous payment
    ///
    /// The amount is not checked against the original charge.
    fn refund_payment(&self, transaction_id: &str, amount: Decimal) -> bool;

    /// Human readable status containing the transaction id
    ///
    /// Unknown ids yield a "not found" or "Unknown" sentinel instead of failing.
    fn payment_status(&self, transaction_id: &str) -> String;

    /// Id minted by the most recent successful `process_payment`
    fn last_transaction_id(&self) -> Option<TransactionId>;
}

/// Create a payment processor for `method`
///
/// Every collaborator is injected. The direct processor only uses the logger;
/// the adapter also takes the gateway and the payer directory.
pub fn create_processor(
    method: PaymentMethod,
    logger: Arc<dyn PaymentLogger>,
    gateway: Arc<dyn ExternalGateway>,
    payers: PayerDirectory,
) -> Box<dyn PaymentProcessor> {
    logger.info(&format!("Creating {} payment processor", method));
    match method {
        PaymentMethod::CreditCard => Box::new(DirectProcessor::new(logger)),
        PaymentMethod::PayPal => Box::new(GatewayAdapter::new(gateway, logger, payers)),
    }
}

/// Slot holding the id of the latest successful payment
#[derive(Debug, Default)]
pub(crate) struct LastTransaction(Mutex<Option<TransactionId>>);

impl LastTransaction {
    pub(crate) fn set(&self, tx_id: &str) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = Some(tx_id.to_string());
    }

    pub(crate) fn get(&self) -> Option<TransactionId> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
