use serde::{Deserialize, Serialize};
use sps_common::Paise;
use sqlx::FromRow;

use crate::db_types::{GatewayOrderId, Order};

/// What checkout hands back to the client: everything the payment widget needs to collect the payment, plus our own
/// order id for later reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResult {
    pub gateway_order_id: GatewayOrderId,
    /// The charge amount in minor currency units, as confirmed by the provider.
    pub amount: Paise,
    pub internal_order_id: i64,
}

/// An order list for a single consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResult {
    pub customer_id: i64,
    pub total_orders: Paise,
    pub orders: Vec<Order>,
}

/// An order joined with the consumer's display details, for admin listings. The details are optional because the
/// account system, not this one, owns consumer records.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OrderWithCustomer {
    #[sqlx(flatten)]
    pub order: Order,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
}
