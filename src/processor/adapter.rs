//! Adapter from the payment contract to the external gateway
//!
//! The gateway speaks a different language than the contract: it wants an
//! email-like payer id instead of a customer id, a floating point amount
//! instead of a decimal, two calls to settle a payment, and it hands out its
//! own authorization tokens. `GatewayAdapter` bridges the two:
//!
//! 1. `process_payment` resolves the payer, authorizes, completes, and only
//!    then mints a contract transaction id mapped to the gateway token.
//! 2. `refund_payment` looks the token up and asks the gateway for a refund.
//! 3. `payment_status` looks the token up and reports the gateway state.
//!
//! # Translation Table
//!
//! Contract ids map to authorization tokens in a `DashMap`. It is the only
//! state that makes a contract id resolvable: an id without an entry is
//! "not found" even if the gateway still holds the payment.
//!
//! # Partial Failure
//!
//! Authorize and complete are not atomic. If completion fails the gateway
//! keeps a `PENDING` authorization that no contract id refers to. Such
//! orphans are not reconciled.

use crate::core::PayerDirectory;
use crate::gateway::ExternalGateway;
use crate::logging::PaymentLogger;
use crate::processor::{LastTransaction, PaymentMethod, PaymentProcessor};
use crate::types::{generate_id, PaymentError, TransactionId};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Prefix of transaction ids minted by the adapter
pub const PAYPAL_ID_PREFIX: &str = "TXN";

/// Payer id used for refunds when the directory is empty
pub const UNKNOWN_REFUND_PAYER: &str = "unknown@example.nl";

/// Gateway payments exposed through the uniform contract
pub struct GatewayAdapter {
    gateway: Arc<dyn ExternalGateway>,
    logger: Arc<dyn PaymentLogger>,
    payers: PayerDirectory,
    /// Contract transaction id -> gateway authorization token
    translations: DashMap<TransactionId, String>,
    last_transaction: LastTransaction,
}

impl GatewayAdapter {
    pub fn new(
        gateway: Arc<dyn ExternalGateway>,
        logger: Arc<dyn PaymentLogger>,
        payers: PayerDirectory,
    ) -> Self {
        GatewayAdapter {
            gateway,
            logger,
            payers,
            translations: DashMap::new(),
            last_transaction: LastTransaction::default(),
        }
    }

    /// Gateway authorization token behind a contract transaction id
    pub fn authorization_token(&self, transaction_id: &str) -> Option<String> {
        self.translations
            .get(transaction_id)
            .map(|entry| entry.value().clone())
    }

    /// Number of contract transactions the adapter can resolve
    pub fn translation_count(&self) -> usize {
        self.translations.len()
    }

    pub fn payers(&self) -> &PayerDirectory {
        &self.payers
    }

    /// Payer id sent along with refunds
    ///
    /// This is the first entry of the payer directory, not the payer of the
    /// refunded transaction.
    pub fn refund_payer(&self) -> &str {
        self.payers.first().unwrap_or(UNKNOWN_REFUND_PAYER)
    }

    fn authorize_and_complete(
        &self,
        customer_id: &str,
        amount: Decimal,
    ) -> Result<TransactionId, PaymentError> {
        let payer_id = self.payers.resolve(customer_id);
        let gateway_amount = to_gateway_amount(amount)?;

        self.logger.info(&format!(
            "PayPal Adapter: Processing payment for customer {}",
            customer_id
        ));
        self.logger
            .info(&format!("Email: {}, Amount: €{:.2}", payer_id, amount));

        let token = self.gateway.authorize(&payer_id, gateway_amount)?;
        if !self.gateway.complete(&token)? {
            return Err(PaymentError::completion_declined(&token));
        }

        Ok(self.register(token))
    }

    /// Mint a fresh contract id for `token`
    fn register(&self, token: String) -> TransactionId {
        loop {
            let tx_id = generate_id(PAYPAL_ID_PREFIX);
            if let Entry::Vacant(entry) = self.translations.entry(tx_id.clone()) {
                entry.insert(token);
                return tx_id;
            }
        }
    }

    fn request_refund(&self, transaction_id: &str, amount: Decimal) -> Result<String, PaymentError> {
        let token = self
            .authorization_token(transaction_id)
            .ok_or_else(|| PaymentError::transaction_not_found(transaction_id, "refund"))?;

        self.logger.info(&format!(
            "PayPal Adapter: Processing refund for transaction {}",
            transaction_id
        ));
        self.logger.info(&format!("Amount: €{:.2}", amount));

        let gateway_amount = to_gateway_amount(amount)?;
        self.gateway
            .refund(self.refund_payer(), &token, gateway_amount)
    }
}

fn to_gateway_amount(amount: Decimal) -> Result<f64, PaymentError> {
    amount
        .to_f64()
        .ok_or_else(|| PaymentError::amount_not_representable(amount))
}

impl PaymentProcessor for GatewayAdapter {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::PayPal
    }

    fn process_payment(&self, customer_id: &str, amount: Decimal) -> bool {
        match self.authorize_and_complete(customer_id, amount) {
            Ok(tx_id) => {
                self.last_transaction.set(&tx_id);
                self.logger.success(&format!(
                    "PayPal payment successful! Transaction ID: {}",
                    tx_id
                ));
                true
            }
            Err(e @ PaymentError::CompletionDeclined { .. }) => {
                self.logger.error(&format!("PayPal payment failed! {}", e));
                false
            }
            Err(e) => {
                self.logger.error(&format!("PayPal Adapter Error: {}", e));
                false
            }
        }
    }

    fn refund_payment(&self, transaction_id: &str, amount: Decimal) -> bool {
        match self.request_refund(transaction_id, amount) {
            Ok(refund_id) => {
                self.logger.success(&format!(
                    "PayPal refund successful! Refund ID: {}",
                    refund_id
                ));
                true
            }
            Err(e) => {
                self.logger.error(&format!("PayPal Adapter Error: {}", e));
                false
            }
        }
    }

    fn payment_status(&self, transaction_id: &str) -> String {
        match self.authorization_token(transaction_id) {
            Some(token) => {
                let status = self.gateway.check_status(&token);
                format!(
                    "PayPal transaction {} status: {}",
                    transaction_id, status.state
                )
            }
            None => format!("Transaction {} not found in PayPal records", transaction_id),
        }
    }

    fn last_transaction_id(&self) -> Option<TransactionId> {
        self.last_transaction.get()
    }
}
