//! Direct card payment processor
//!
//! `DirectProcessor` owns its transaction ledger and settles every payment in a
//! single step: the record is created already `COMPLETED`.
//!
//! Refunds of unknown transaction ids still report success. Only a failure to
//! update a known record makes a refund return `false`.

use crate::core::TransactionLedger;
use crate::logging::PaymentLogger;
use crate::processor::{LastTransaction, PaymentMethod, PaymentProcessor};
use crate::types::{generate_id, PaymentError, TransactionId, TransactionRecord};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Prefix of transaction ids minted by the direct processor
pub const CREDIT_CARD_ID_PREFIX: &str = "CC";

/// Card payments backed by a private ledger
pub struct DirectProcessor {
    ledger: TransactionLedger,
    logger: Arc<dyn PaymentLogger>,
    last_transaction: LastTransaction,
}

impl DirectProcessor {
    pub fn new(logger: Arc<dyn PaymentLogger>) -> Self {
        DirectProcessor {
            ledger: TransactionLedger::new(),
            logger,
            last_transaction: LastTransaction::default(),
        }
    }

    /// Read access to the processor's ledger
    pub fn ledger(&self) -> &TransactionLedger {
        &self.ledger
    }

    /// Build the record first so a rejected amount leaves the ledger untouched
    fn record_payment(
        &self,
        customer_id: &str,
        amount: Decimal,
    ) -> Result<TransactionId, PaymentError> {
        let record = TransactionRecord::completed(customer_id, amount)?;

        loop {
            let tx_id = generate_id(CREDIT_CARD_ID_PREFIX);
            if self.ledger.insert(tx_id.clone(), record.clone()) {
                return Ok(tx_id);
            }
        }
    }
}

impl PaymentProcessor for DirectProcessor {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::CreditCard
    }

    fn process_payment(&self, customer_id: &str, amount: Decimal) -> bool {
        self.logger.info(&format!(
            "Processing credit card payment for customer {}",
            customer_id
        ));
        self.logger.info(&format!("Amount: €{:.2}", amount));

        match self.record_payment(customer_id, amount) {
            Ok(tx_id) => {
                self.last_transaction.set(&tx_id);
                self.logger.success(&format!(
                    "Credit card payment successful! Transaction ID: {}",
                    tx_id
                ));
                true
            }
            Err(e) => {
                self.logger
                    .error(&format!("Credit card payment failed: {}", e));
                false
            }
        }
    }

    fn refund_payment(&self, transaction_id: &str, amount: Decimal) -> bool {
        self.logger.warning(&format!(
            "Refunding credit card payment for transaction {}",
            transaction_id
        ));
        self.logger.warning(&format!("Amount: €{:.2}", amount));

        match self.ledger.mark_refunded(transaction_id, amount) {
            Ok(()) => {}
            // Unknown ids are reported as refunded
            Err(PaymentError::TransactionNotFound { .. }) => {
                self.logger.warning(&format!(
                    "No credit card transaction {} on record",
                    transaction_id
                ));
            }
            Err(e) => {
                self.logger
                    .error(&format!("Credit card refund failed: {}", e));
                return false;
            }
        }

        self.logger.success("Credit card refund successful!");
        true
    }

    fn payment_status(&self, transaction_id: &str) -> String {
        match self.ledger.status(transaction_id) {
            Some(status) => format!(
                "Credit card transaction {} status: {}",
                transaction_id, status
            ),
            None => format!(
                "Credit card transaction {} status: Unknown",
                transaction_id
            ),
        }
    }

    fn last_transaction_id(&self) -> Option<TransactionId> {
        self.last_transaction.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MemoryLogger};
    use crate::types::TransactionStatus;
    use rust_decimal_macros::dec;

    fn processor() -> (DirectProcessor, Arc<MemoryLogger>) {
        let logger = Arc::new(MemoryLogger::new());
        (DirectProcessor::new(logger.clone()), logger)
    }

    #[test]
    fn test_process_payment_records_completed_transaction() {
        let (processor, logger) = processor();

        assert!(processor.process_payment("CUST001", dec!(123.45)));

        let tx_id = processor.last_transaction_id().unwrap();
        assert!(tx_id.starts_with(CREDIT_CARD_ID_PREFIX));
        let record = processor.ledger().get(&tx_id).unwrap();
        assert_eq!(record.customer_id, "CUST001");
        assert_eq!(record.amount, dec!(123.45));
        assert_eq!(record.status, TransactionStatus::Completed);

        let last = logger.last().unwrap();
        assert_eq!(last.level, LogLevel::Success);
        assert!(last.message.contains("successful"));
    }

    #[test]
    fn test_process_payment_logs_amount_with_two_decimals() {
        let (processor, logger) = processor();
        processor.process_payment("CUST001", dec!(39.9));
        assert!(logger
            .messages(LogLevel::Info)
            .contains(&"Amount: €39.90".to_string()));
    }

    #[test]
    fn test_zero_amount_is_accepted() {
        let (processor, _) = processor();
        assert!(processor.process_payment("CUST999", Decimal::ZERO));
        assert_eq!(processor.ledger().len(), 1);
    }

    #[test]
    fn test_negative_amount_fails_and_leaves_ledger_untouched() {
        let (processor, logger) = processor();

        assert!(!processor.process_payment("CUST001", dec!(-10.00)));

        assert!(processor.ledger().is_empty());
        assert!(processor.last_transaction_id().is_none());
        let last = logger.last().unwrap();
        assert_eq!(last.level, LogLevel::Error);
        assert!(last.message.starts_with("Credit card payment failed"));
    }

    #[test]
    fn test_refund_known_transaction() {
        let (processor, logger) = processor();
        processor.process_payment("CUST001", dec!(39.95));
        let tx_id = processor.last_transaction_id().unwrap();

        assert!(processor.refund_payment(&tx_id, dec!(39.95)));

        let record = processor.ledger().get(&tx_id).unwrap();
        assert_eq!(record.status, TransactionStatus::Refunded);
        assert_eq!(record.refund_amount, Some(dec!(39.95)));
        assert!(record.refunded_at.is_some());
        assert!(logger.last().unwrap().message.contains("successful"));
    }

    #[test]
    fn test_refund_unknown_transaction_still_succeeds() {
        let (processor, logger) = processor();

        assert!(processor.refund_payment("TX12345", dec!(45.67)));

        assert!(processor.ledger().is_empty());
        assert_eq!(logger.last().unwrap().level, LogLevel::Success);
    }

    #[test]
    fn test_refund_of_pending_record_fails() {
        let (processor, logger) = processor();
        processor.ledger().insert(
            "CCpending".to_string(),
            TransactionRecord::pending("CUST001", dec!(5)).unwrap(),
        );

        assert!(!processor.refund_payment("CCpending", dec!(5)));
        assert_eq!(logger.last().unwrap().level, LogLevel::Error);
        assert_eq!(
            processor.ledger().status("CCpending"),
            Some(TransactionStatus::Pending)
        );
    }

    #[test]
    fn test_payment_status_formats() {
        let (processor, _) = processor();
        processor.process_payment("CUST001", dec!(10));
        let tx_id = processor.last_transaction_id().unwrap();

        assert_eq!(
            processor.payment_status(&tx_id),
            format!("Credit card transaction {} status: COMPLETED", tx_id)
        );
        assert_eq!(
            processor.payment_status("TX12345"),
            "Credit card transaction TX12345 status: Unknown"
        );
    }

    #[test]
    fn test_partial_refund_is_not_validated() {
        let (processor, _) = processor();
        processor.process_payment("CUST001", dec!(10));
        let tx_id = processor.last_transaction_id().unwrap();

        assert!(processor.refund_payment(&tx_id, dec!(250)));
        assert_eq!(
            processor.ledger().get(&tx_id).unwrap().refund_amount,
            Some(dec!(250))
        );
    }
}
