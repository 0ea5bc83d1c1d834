use sps_common::Paise;

use crate::{
    api::order_objects::{OrderResult, OrderWithCustomer},
    db_types::{Consumer, GatewayOrderId, Order},
    traits::{AccountApiError, AccountManagement},
};

/// Query API over the order store, for both consumer-facing and administrative listings.
#[derive(Debug, Clone)]
pub struct AccountApi<B> {
    db: B,
}

impl<B> AccountApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> AccountApi<B>
where B: AccountManagement
{
    pub async fn orders_for_customer(&self, customer_id: i64) -> Result<OrderResult, AccountApiError> {
        let orders = self.db.fetch_orders_for_customer(customer_id).await?;
        let total_orders: Paise = orders.iter().map(|o| o.total_price).sum();
        Ok(OrderResult { customer_id, total_orders, orders })
    }

    pub async fn fetch_order_by_gateway_id(&self, id: &GatewayOrderId) -> Result<Option<Order>, AccountApiError> {
        self.db.fetch_order_by_gateway_id(id).await
    }

    pub async fn all_orders(&self) -> Result<Vec<OrderWithCustomer>, AccountApiError> {
        self.db.fetch_all_orders_with_customers().await
    }

    pub async fn record_consumer(&self, consumer: &Consumer) -> Result<(), AccountApiError> {
        self.db.upsert_consumer(consumer).await
    }
}
