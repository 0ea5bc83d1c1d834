//! # Backend traits
//!
//! This module defines the contracts that storage and gateway backends must satisfy for the engine to drive the
//! checkout and verification flows.
//!
//! * [`PaymentLedger`] is the write side of the order store: creating pending orders, settling them exactly once,
//!   and the operator status override.
//! * [`AccountManagement`] is the read side: order lookups for consumers and the admin listing with consumer details
//!   joined in.
//! * [`PaymentGateway`] abstracts the remote payment provider's single outbound operation (open a charge), so that
//!   the reconciliation service can be exercised against a test double instead of the live provider.
mod account_management;
mod payment_gateway;
mod payment_ledger;

pub use account_management::{AccountApiError, AccountManagement};
pub use payment_gateway::{GatewayError, PaymentGateway, RemoteCharge};
pub use payment_ledger::{MarkPaidOutcome, PaymentLedger, PaymentLedgerError};
