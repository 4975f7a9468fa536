//! In-process simulation of the external gateway
//!
//! `SimulatedGateway` keeps its transactions in a `DashMap` keyed by
//! authorization token. It validates every argument before touching state,
//! so a rejected call never leaves a partial record behind.
//!
//! Authorization and completion are separate calls. A token that was
//! authorized but never completed stays `PENDING` forever; nothing sweeps it.

use crate::gateway::{ExternalGateway, GatewayState, GatewayStatus};
use crate::types::{generate_id, PaymentError};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

/// Prefix of refund identifiers
pub const REFUND_ID_PREFIX: &str = "REF";

/// A transaction as the gateway stores it
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayTransactionInfo {
    pub payer_id: String,
    pub amount: f64,
    pub state: GatewayState,
    pub created: DateTime<Utc>,
    pub completed: Option<DateTime<Utc>>,
    pub refunded: Option<DateTime<Utc>>,
    pub refund_amount: Option<f64>,
}

impl GatewayTransactionInfo {
    fn status(&self, token: &str) -> GatewayStatus {
        GatewayStatus {
            id: token.to_string(),
            state: self.state,
            payer_id: Some(self.payer_id.clone()),
            amount: Some(self.amount),
            created: Some(self.created),
            completed: self.completed,
            refunded: self.refunded,
            refund_amount: self.refund_amount,
            checked_at: Utc::now(),
        }
    }
}

/// Thread-safe simulated gateway
#[derive(Debug, Default)]
pub struct SimulatedGateway {
    transactions: DashMap<String, GatewayTransactionInfo>,
}

impl SimulatedGateway {
    pub fn new() -> Self {
        SimulatedGateway {
            transactions: DashMap::new(),
        }
    }

    /// Copy of the stored transaction behind `token`
    pub fn transaction(&self, token: &str) -> Option<GatewayTransactionInfo> {
        self.transactions
            .get(token)
            .map(|entry| entry.value().clone())
    }

    /// Tokens that were authorized but never completed
    pub fn pending_tokens(&self) -> Vec<String> {
        self.transactions
            .iter()
            .filter(|entry| entry.value().state == GatewayState::Pending)
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Number of transactions the gateway knows about
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

fn require_non_empty(param: &str, value: &str, message: &str) -> Result<(), PaymentError> {
    if value.is_empty() {
        return Err(PaymentError::invalid_argument(param, message));
    }
    Ok(())
}

fn require_positive(param: &str, value: f64, message: &str) -> Result<(), PaymentError> {
    // NaN fails this comparison too
    if !(value > 0.0) {
        return Err(PaymentError::invalid_argument(param, message));
    }
    Ok(())
}

impl ExternalGateway for SimulatedGateway {
    fn authorize(&self, payer_id: &str, amount: f64) -> Result<String, PaymentError> {
        require_non_empty("payer_id", payer_id, "Payer id is required")?;
        require_positive("amount", amount, "Payment amount must be positive")?;

        let token = Uuid::new_v4().to_string();
        debug!(payer = payer_id, amount, token = %token, "gateway: authorizing payment");

        self.transactions.insert(
            token.clone(),
            GatewayTransactionInfo {
                payer_id: payer_id.to_string(),
                amount,
                state: GatewayState::Pending,
                created: Utc::now(),
                completed: None,
                refunded: None,
                refund_amount: None,
            },
        );

        Ok(token)
    }

    fn complete(&self, token: &str) -> Result<bool, PaymentError> {
        require_non_empty("token", token, "Authorization token is required")?;

        let mut entry = self
            .transactions
            .get_mut(token)
            .ok_or_else(|| PaymentError::invalid_argument("token", "Invalid authorization token"))?;

        debug!(token, "gateway: completing payment");
        let info = entry.value_mut();
        info.state = GatewayState::Completed;
        info.completed = Some(Utc::now());

        Ok(true)
    }

    fn refund(&self, payer_id: &str, token: &str, amount: f64) -> Result<String, PaymentError> {
        require_non_empty("payer_id", payer_id, "Payer id is required")?;
        require_non_empty("token", token, "Payment id is required")?;
        require_positive("amount", amount, "Refund amount must be positive")?;

        let mut entry = self
            .transactions
            .get_mut(token)
            .ok_or_else(|| PaymentError::invalid_argument("token", "Invalid payment id"))?;

        debug!(payer = payer_id, token, amount, "gateway: refunding payment");
        let info = entry.value_mut();
        info.state = GatewayState::Refunded;
        info.refunded = Some(Utc::now());
        info.refund_amount = Some(amount);

        Ok(generate_id(REFUND_ID_PREFIX))
    }

    fn check_status(&self, token: &str) -> GatewayStatus {
        match self.transactions.get(token) {
            Some(entry) => entry.value().status(token),
            None => GatewayStatus::not_found(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const PAYER: &str = "klant1@example.nl";

    #[test]
    fn test_authorize_creates_pending_record() {
        let gateway = SimulatedGateway::new();

        let token = gateway.authorize(PAYER, 49.95).unwrap();

        let info = gateway.transaction(&token).unwrap();
        assert_eq!(info.payer_id, PAYER);
        assert_eq!(info.amount, 49.95);
        assert_eq!(info.state, GatewayState::Pending);
        assert!(info.completed.is_none());
        assert_eq!(gateway.pending_tokens(), vec![token]);
    }

    #[test]
    fn test_tokens_are_unique() {
        let gateway = SimulatedGateway::new();
        let first = gateway.authorize(PAYER, 1.0).unwrap();
        let second = gateway.authorize(PAYER, 1.0).unwrap();
        assert_ne!(first, second);
        assert_eq!(gateway.len(), 2);
    }

    #[rstest]
    #[case::empty_payer("", 10.0, "payer_id")]
    #[case::zero_amount(PAYER, 0.0, "amount")]
    #[case::negative_amount(PAYER, -5.0, "amount")]
    #[case::nan_amount(PAYER, f64::NAN, "amount")]
    fn test_authorize_rejects_invalid_arguments(
        #[case] payer: &str,
        #[case] amount: f64,
        #[case] param: &str,
    ) {
        let gateway = SimulatedGateway::new();

        let result = gateway.authorize(payer, amount);

        assert!(matches!(
            result,
            Err(PaymentError::InvalidArgument { param: ref p, .. }) if p == param
        ));
        assert!(gateway.is_empty());
    }

    #[test]
    fn test_complete_moves_to_completed() {
        let gateway = SimulatedGateway::new();
        let token = gateway.authorize(PAYER, 10.0).unwrap();

        assert!(gateway.complete(&token).unwrap());

        let info = gateway.transaction(&token).unwrap();
        assert_eq!(info.state, GatewayState::Completed);
        assert!(info.completed.is_some());
        assert!(gateway.pending_tokens().is_empty());
    }

    #[rstest]
    #[case::empty_token("")]
    #[case::unknown_token("not-a-token")]
    fn test_complete_rejects_bad_token(#[case] token: &str) {
        let gateway = SimulatedGateway::new();
        let result = gateway.complete(token);
        assert!(result.unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_refund_records_amount_and_returns_refund_id() {
        let gateway = SimulatedGateway::new();
        let token = gateway.authorize(PAYER, 100.0).unwrap();
        gateway.complete(&token).unwrap();

        let refund_id = gateway.refund(PAYER, &token, 40.0).unwrap();

        assert!(refund_id.starts_with(REFUND_ID_PREFIX));
        assert_eq!(refund_id.len(), REFUND_ID_PREFIX.len() + 8);
        let info = gateway.transaction(&token).unwrap();
        assert_eq!(info.state, GatewayState::Refunded);
        assert_eq!(info.refund_amount, Some(40.0));
        assert!(info.refunded.is_some());
    }

    #[rstest]
    #[case::empty_payer("", true, 10.0)]
    #[case::empty_token(PAYER, false, 10.0)]
    #[case::zero_amount(PAYER, true, 0.0)]
    #[case::negative_amount(PAYER, true, -1.0)]
    fn test_refund_rejects_invalid_arguments(
        #[case] payer: &str,
        #[case] use_token: bool,
        #[case] amount: f64,
    ) {
        let gateway = SimulatedGateway::new();
        let token = gateway.authorize(PAYER, 100.0).unwrap();
        gateway.complete(&token).unwrap();
        let token_arg = if use_token { token.as_str() } else { "" };

        let result = gateway.refund(payer, token_arg, amount);

        assert!(result.unwrap_err().is_invalid_argument());
        assert_eq!(
            gateway.transaction(&token).unwrap().state,
            GatewayState::Completed
        );
    }

    #[test]
    fn test_refund_rejects_unknown_token() {
        let gateway = SimulatedGateway::new();
        let result = gateway.refund(PAYER, "unknown", 10.0);
        assert_eq!(
            result,
            Err(PaymentError::invalid_argument("token", "Invalid payment id"))
        );
    }

    #[test]
    fn test_check_status_unknown_token_is_not_found() {
        let gateway = SimulatedGateway::new();

        let status = gateway.check_status("unknown");
        assert_eq!(status.state, GatewayState::NotFound);
        assert_eq!(status.id, "unknown");

        let empty = gateway.check_status("");
        assert_eq!(empty.state, GatewayState::NotFound);
    }

    #[test]
    fn test_check_status_reports_full_record() {
        let gateway = SimulatedGateway::new();
        let token = gateway.authorize(PAYER, 75.5).unwrap();
        gateway.complete(&token).unwrap();

        let status = gateway.check_status(&token);

        assert_eq!(status.state, GatewayState::Completed);
        assert_eq!(status.payer_id.as_deref(), Some(PAYER));
        assert_eq!(status.amount, Some(75.5));
        assert!(status.created.is_some());
        assert!(status.completed.is_some());
        assert_eq!(status.field("refunded").as_deref(), Some("N/A"));
    }
}
