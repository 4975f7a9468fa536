//! Payment Adapter Library
//! # Overview
//!
//! This library provides a uniform payment processing contract with two
//! implementations whose native transaction models are incompatible.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (TransactionRecord, TransactionStatus, PaymentError)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Shared state components:
//!   - [`core::ledger`] - Transaction records owned by the direct processor
//!   - [`core::payer_directory`] - Customer id to gateway payer id mapping
//! - [`gateway`] - The external gateway contract and its in-process simulation
//! - [`processor`] - The `PaymentProcessor` contract, its implementations and the factory
//! - [`logging`] - Logging collaborator injected into every processor
//!
//! # Payment Methods
//!
//! - **Credit Card**: `DirectProcessor` settles payments in one step against its own ledger
//! - **PayPal**: `GatewayAdapter` authorizes and completes through the gateway and maps
//!   its own transaction ids to gateway authorization tokens
//!
//! # Transaction States
//!
//! Every record moves forward only:
//! - `PENDING`: recorded but not settled
//! - `COMPLETED`: settled
//! - `REFUNDED`: refund recorded, with refund amount and timestamp

// Module declarations
pub mod cli;
pub mod core;
pub mod gateway;
pub mod logging;
pub mod processor;
pub mod types;

pub use core::{PayerDirectory, TransactionLedger};
pub use gateway::{ExternalGateway, SimulatedGateway};
pub use logging::{MemoryLogger, PaymentLogger, TracingLogger};
pub use processor::{
    create_processor, DirectProcessor, GatewayAdapter, PaymentMethod, PaymentProcessor,
};
pub use types::{
    CustomerId, PaymentError, TransactionId, TransactionRecord, TransactionStatus,
};
