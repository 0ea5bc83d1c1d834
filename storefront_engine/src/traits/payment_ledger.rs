use thiserror::Error;

use crate::{
    db_types::{GatewayOrderId, NewOrder, Order, PaymentStatus},
    traits::{AccountApiError, AccountManagement},
};

#[derive(Debug, Error)]
pub enum PaymentLedgerError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("No order exists for gateway reference {0}")]
    OrderNotFound(GatewayOrderId),
    #[error("Order {0} does not exist")]
    OrderIdNotFound(i64),
    #[error("Order {0} is in state {1} and cannot be settled")]
    OrderNotPayable(GatewayOrderId, PaymentStatus),
    #[error("An order with gateway reference {0} already exists")]
    DuplicateGatewayReference(GatewayOrderId),
}

impl From<sqlx::Error> for PaymentLedgerError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

impl From<AccountApiError> for PaymentLedgerError {
    fn from(e: AccountApiError) -> Self {
        match e {
            AccountApiError::DatabaseError(s) => Self::DatabaseError(s),
            AccountApiError::OrderNotFound(id) => Self::OrderIdNotFound(id),
        }
    }
}

/// The result of a settle attempt.
#[derive(Debug, Clone)]
pub enum MarkPaidOutcome {
    /// This call won the conditional update and moved the order from `Pending` to `Paid`.
    Updated(Order),
    /// The order was already `Paid`; nothing was changed. Repeat verifications land here, as does the loser of a
    /// concurrent settle race.
    AlreadyPaid(Order),
}

impl MarkPaidOutcome {
    pub fn order(&self) -> &Order {
        match self {
            MarkPaidOutcome::Updated(o) | MarkPaidOutcome::AlreadyPaid(o) => o,
        }
    }

    pub fn into_order(self) -> Order {
        match self {
            MarkPaidOutcome::Updated(o) | MarkPaidOutcome::AlreadyPaid(o) => o,
        }
    }
}

/// Write-side behaviour of the order store.
#[allow(async_fn_in_trait)]
pub trait PaymentLedger: Clone + AccountManagement {
    /// The URL of the backing database.
    fn url(&self) -> &str;

    /// Persist a new pending order. The gateway order reference must be fresh; inserting a duplicate reference is an
    /// error, never a silent overwrite.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, PaymentLedgerError>;

    /// Settle the order carrying the given gateway reference: set status to `Paid` and record the gateway payment
    /// id, in a single conditional update (`... WHERE status = 'Pending'`) so the store itself guarantees at most
    /// one writer wins.
    ///
    /// Losing the race, or re-settling an already-paid order, returns [`MarkPaidOutcome::AlreadyPaid`] with the
    /// stored payment id untouched. An order in the `Failed` state is not payable and returns an error.
    async fn mark_order_paid(
        &self,
        gateway_order_id: &GatewayOrderId,
        gateway_payment_id: &str,
    ) -> Result<MarkPaidOutcome, PaymentLedgerError>;

    /// Operator override: set the order status directly, bypassing the `Pending` -> `Paid` state machine. Trusted
    /// input; deliberately not validated against the state machine so that a stuck order can always be corrected.
    async fn override_order_status(&self, order_id: i64, status: PaymentStatus) -> Result<Order, PaymentLedgerError>;
}
