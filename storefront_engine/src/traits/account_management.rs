use thiserror::Error;

use crate::{
    api::order_objects::OrderWithCustomer,
    db_types::{Consumer, GatewayOrderId, Order},
};

#[derive(Debug, Error)]
pub enum AccountApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Order {0} does not exist")]
    OrderNotFound(i64),
}

impl From<sqlx::Error> for AccountApiError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

/// Query-side behaviour of the order store.
#[allow(async_fn_in_trait)]
pub trait AccountManagement {
    /// Fetch the order carrying the given gateway order reference, if any. The reference is unique per order.
    async fn fetch_order_by_gateway_id(&self, id: &GatewayOrderId) -> Result<Option<Order>, AccountApiError>;

    /// All orders belonging to the given consumer, newest first.
    async fn fetch_orders_for_customer(&self, customer_id: i64) -> Result<Vec<Order>, AccountApiError>;

    /// Every order in the system, newest first, with the consumer's display details joined in where known.
    async fn fetch_all_orders_with_customers(&self) -> Result<Vec<OrderWithCustomer>, AccountApiError>;

    /// Refresh the display snapshot for a consumer. Account provisioning proper lives outside this system; this only
    /// keeps the name/email shown on admin listings current.
    async fn upsert_consumer(&self, consumer: &Consumer) -> Result<(), AccountApiError>;
}
