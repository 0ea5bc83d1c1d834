//! `SqliteDatabase` is the bundled order-store backend.
//!
//! It implements [`AccountManagement`] and [`PaymentLedger`] on top of an sqlx connection pool, delegating the
//! actual queries to the functions in [`super::db`].
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{consumers, db_url, new_pool, orders};
use crate::{
    api::order_objects::OrderWithCustomer,
    db_types::{Consumer, GatewayOrderId, NewOrder, Order, PaymentStatus},
    traits::{AccountApiError, AccountManagement, MarkPaidOutcome, PaymentLedger, PaymentLedgerError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Connect to the database given by the `SPS_DATABASE_URL` env var, or the default URL.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        Self::new_with_url(&url, max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Bring the schema up to date. Safe to call on every startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }
}

impl AccountManagement for SqliteDatabase {
    async fn fetch_order_by_gateway_id(&self, id: &GatewayOrderId) -> Result<Option<Order>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_gateway_id(id, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_orders_for_customer(&self, customer_id: i64) -> Result<Vec<Order>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let orders = orders::fetch_orders_for_customer(customer_id, &mut conn).await?;
        Ok(orders)
    }

    async fn fetch_all_orders_with_customers(&self) -> Result<Vec<OrderWithCustomer>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let orders = orders::fetch_all_orders_with_customers(&mut conn).await?;
        Ok(orders)
    }

    async fn upsert_consumer(&self, consumer: &Consumer) -> Result<(), AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        consumers::upsert_consumer(consumer, &mut conn).await?;
        trace!("🗃️ Consumer #{} snapshot refreshed", consumer.id);
        Ok(())
    }
}

impl PaymentLedger for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, PaymentLedgerError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::insert_order(order, &mut conn).await?;
        debug!("🗃️ Order #{} saved with gateway reference {}", order.id, order.gateway_order_id);
        Ok(order)
    }

    async fn mark_order_paid(
        &self,
        gateway_order_id: &GatewayOrderId,
        gateway_payment_id: &str,
    ) -> Result<MarkPaidOutcome, PaymentLedgerError> {
        let mut conn = self.pool.acquire().await?;
        if let Some(order) = orders::mark_order_paid(gateway_order_id, gateway_payment_id, &mut conn).await? {
            debug!("🗃️ Order #{} moved from Pending to Paid", order.id);
            return Ok(MarkPaidOutcome::Updated(order));
        }
        // Zero rows hit. Either the order doesn't exist, someone beat us to it, or it is in a non-payable state.
        match orders::fetch_order_by_gateway_id(gateway_order_id, &mut conn).await? {
            None => Err(PaymentLedgerError::OrderNotFound(gateway_order_id.clone())),
            Some(order) if order.status == PaymentStatus::Paid => {
                debug!("🗃️ Order #{} is already Paid; treating the settle attempt as a no-op", order.id);
                Ok(MarkPaidOutcome::AlreadyPaid(order))
            },
            Some(order) => Err(PaymentLedgerError::OrderNotPayable(gateway_order_id.clone(), order.status)),
        }
    }

    async fn override_order_status(&self, order_id: i64, status: PaymentStatus) -> Result<Order, PaymentLedgerError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::update_order_status(order_id, status, &mut conn)
            .await?
            .ok_or(PaymentLedgerError::OrderIdNotFound(order_id))?;
        info!("🗃️ Order #{} status overridden to {status}", order.id);
        Ok(order)
    }
}
