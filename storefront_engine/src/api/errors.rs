use sps_common::Paise;
use thiserror::Error;

use crate::{
    db_types::GatewayOrderId,
    traits::{AccountApiError, GatewayError, PaymentLedgerError},
};

#[derive(Debug, Error)]
pub enum OrderFlowError {
    /// The checkout request itself is malformed (empty cart, non-positive price or quantity).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// The remote charge could not be opened. No order has been persisted.
    #[error("Payment gateway unavailable: {0}")]
    GatewayUnavailable(String),
    /// The provider confirmed a different amount than we computed. No order has been persisted.
    #[error("Gateway amount mismatch: expected {expected}, gateway confirmed {confirmed}")]
    GatewayInconsistency { expected: Paise, confirmed: Paise },
    /// The supplied payment signature did not verify. The order, if any, is untouched.
    #[error("Payment signature is invalid")]
    SignatureMismatch,
    #[error("No order exists for gateway reference {0}")]
    OrderNotFound(GatewayOrderId),
    #[error("Order {0} does not exist")]
    OrderIdNotFound(i64),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<GatewayError> for OrderFlowError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Unavailable(msg) => Self::GatewayUnavailable(msg),
        }
    }
}

impl From<PaymentLedgerError> for OrderFlowError {
    fn from(e: PaymentLedgerError) -> Self {
        match e {
            PaymentLedgerError::OrderNotFound(id) => Self::OrderNotFound(id),
            PaymentLedgerError::OrderIdNotFound(id) => Self::OrderIdNotFound(id),
            PaymentLedgerError::OrderNotPayable(id, status) => {
                Self::InvalidRequest(format!("Order {id} is in state {status} and cannot be settled"))
            },
            PaymentLedgerError::DuplicateGatewayReference(id) => {
                Self::DatabaseError(format!("Gateway reference {id} is already in use"))
            },
            PaymentLedgerError::DatabaseError(msg) => Self::DatabaseError(msg),
        }
    }
}

impl From<AccountApiError> for OrderFlowError {
    fn from(e: AccountApiError) -> Self {
        match e {
            AccountApiError::OrderNotFound(id) => Self::OrderIdNotFound(id),
            AccountApiError::DatabaseError(msg) => Self::DatabaseError(msg),
        }
    }
}
