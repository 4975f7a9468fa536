//! External payment gateway
//!
//! The gateway has its own transaction model, incompatible with the
//! `PaymentProcessor` contract:
//!
//! - a payment is two calls, `authorize` then `complete`
//! - transactions are keyed by an authorization token the gateway mints
//! - payers are identified by an email-like payer id, not a customer id
//! - status is reported as a structured record with a string-like state
//!
//! `authorize`, `complete` and `refund` reject malformed input with
//! `PaymentError::InvalidArgument`. `check_status` never fails: an unknown
//! token yields a `NotFound` status.

use crate::types::PaymentError;
use chrono::{DateTime, Utc};
use std::fmt;

pub mod simulated;

pub use simulated::{GatewayTransactionInfo, SimulatedGateway};

/// Rendering used for absent status fields
pub const NOT_AVAILABLE: &str = "N/A";

/// Transaction state as reported by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayState {
    Pending,
    Completed,
    Refunded,
    NotFound,
}

impl GatewayState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayState::Pending => "PENDING",
            GatewayState::Completed => "COMPLETED",
            GatewayState::Refunded => "REFUNDED",
            GatewayState::NotFound => "NOT_FOUND",
        }
    }
}

impl fmt::Display for GatewayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a gateway status check
///
/// For an unknown token only `id`, `state` and `checked_at` are meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayStatus {
    pub id: String,
    pub state: GatewayState,
    pub payer_id: Option<String>,
    pub amount: Option<f64>,
    pub created: Option<DateTime<Utc>>,
    pub completed: Option<DateTime<Utc>>,
    pub refunded: Option<DateTime<Utc>>,
    pub refund_amount: Option<f64>,
    pub checked_at: DateTime<Utc>,
}

impl GatewayStatus {
    /// Status for a token the gateway has never issued
    pub fn not_found(id: &str) -> Self {
        GatewayStatus {
            id: id.to_string(),
            state: GatewayState::NotFound,
            payer_id: None,
            amount: None,
            created: None,
            completed: None,
            refunded: None,
            refund_amount: None,
            checked_at: Utc::now(),
        }
    }

    pub fn is_found(&self) -> bool {
        self.state != GatewayState::NotFound
    }

    /// Flat key/value view of the status, as the gateway reports it
    ///
    /// A missing record reports `id`, `status` and `date`. A known record
    /// reports every field, with absent values rendered as `N/A`.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        if !self.is_found() {
            return vec![
                ("id", self.id.clone()),
                ("status", self.state.to_string()),
                ("date", self.checked_at.to_rfc3339()),
            ];
        }

        fn or_na<T: ToString>(value: Option<T>) -> String {
            value
                .map(|v| v.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        }

        vec![
            ("id", self.id.clone()),
            ("payer", or_na(self.payer_id.as_deref())),
            ("amount", or_na(self.amount)),
            ("status", self.state.to_string()),
            ("created", or_na(self.created.map(|t| t.to_rfc3339()))),
            ("completed", or_na(self.completed.map(|t| t.to_rfc3339()))),
            ("refunded", or_na(self.refunded.map(|t| t.to_rfc3339()))),
            ("refund_amount", or_na(self.refund_amount)),
        ]
    }

    /// Value of a single field from `fields()`
    pub fn field(&self, name: &str) -> Option<String> {
        self.fields()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

/// The four-call contract of the external gateway
pub trait ExternalGateway: Send + Sync {
    /// Authorize `amount` for `payer_id` and return an authorization token
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `payer_id` is empty or `amount` is not positive.
    fn authorize(&self, payer_id: &str, amount: f64) -> Result<String, PaymentError>;

    /// Complete a previously authorized payment
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `token` is empty or unknown.
    fn complete(&self, token: &str) -> Result<bool, PaymentError>;

    /// Refund `amount` of the payment behind `token` and return a refund id
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if any argument is empty or non-positive, or if
    /// `token` is unknown.
    fn refund(&self, payer_id: &str, token: &str, amount: f64) -> Result<String, PaymentError>;

    /// Report the state of the payment behind `token`
    fn check_status(&self, token: &str) -> GatewayStatus;
}
