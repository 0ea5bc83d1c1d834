use chrono::Utc;
use log::debug;
use sqlx::{types::Json, SqliteConnection};

use crate::{
    api::order_objects::OrderWithCustomer,
    db_types::{GatewayOrderId, NewOrder, Order, PaymentStatus},
    traits::PaymentLedgerError,
};

/// Inserts a new pending order. The UNIQUE index on `gateway_order_id` makes a duplicate gateway reference a hard
/// error rather than a silent overwrite.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, PaymentLedgerError> {
    let now = Utc::now();
    let gateway_order_id = order.gateway_order_id.clone();
    let inserted = sqlx::query_as::<_, Order>(
        r#"
            INSERT INTO orders (
                customer_id,
                items,
                shipping_address,
                total_price,
                currency,
                gateway_order_id,
                status,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING *;
        "#,
    )
    .bind(order.customer_id)
    .bind(Json(&order.items))
    .bind(Json(&order.shipping_address))
    .bind(order.total_price)
    .bind(order.currency)
    .bind(order.gateway_order_id)
    .bind(PaymentStatus::Pending)
    .bind(now)
    .fetch_one(conn)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            PaymentLedgerError::DuplicateGatewayReference(gateway_order_id.clone())
        },
        _ => PaymentLedgerError::from(e),
    })?;
    debug!("📝️ Order inserted with id {} under gateway reference {}", inserted.id, inserted.gateway_order_id);
    Ok(inserted)
}

pub async fn fetch_order_by_gateway_id(
    id: &GatewayOrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE gateway_order_id = $1")
        .bind(id.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

/// Newest-first orders for a single consumer.
pub async fn fetch_orders_for_customer(
    customer_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, sqlx::Error> {
    let orders = sqlx::query_as("SELECT * FROM orders WHERE customer_id = $1 ORDER BY created_at DESC, id DESC")
        .bind(customer_id)
        .fetch_all(conn)
        .await?;
    Ok(orders)
}

/// Every order, newest first, with consumer display details joined in where the account system knows the consumer.
pub async fn fetch_all_orders_with_customers(
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderWithCustomer>, sqlx::Error> {
    let orders = sqlx::query_as(
        r#"
            SELECT o.*, c.name AS customer_name, c.email AS customer_email
            FROM orders o
            LEFT JOIN consumers c ON c.id = o.customer_id
            ORDER BY o.created_at DESC, o.id DESC
        "#,
    )
    .fetch_all(conn)
    .await?;
    Ok(orders)
}

/// The settle step of verification: a single conditional update so that the database, not application code, decides
/// which of any concurrent confirmations wins. Returns `None` if the order was not `Pending` (or does not exist);
/// the caller disambiguates with a follow-up fetch.
pub async fn mark_order_paid(
    id: &GatewayOrderId,
    gateway_payment_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as(
        r#"
            UPDATE orders
            SET status = $1, gateway_payment_id = $2, updated_at = $3
            WHERE gateway_order_id = $4 AND status = $5
            RETURNING *;
        "#,
    )
    .bind(PaymentStatus::Paid)
    .bind(gateway_payment_id)
    .bind(Utc::now())
    .bind(id.as_str())
    .bind(PaymentStatus::Pending)
    .fetch_optional(conn)
    .await?;
    Ok(order)
}

/// Unconditional status write for the operator override. Does not touch `gateway_payment_id`.
pub async fn update_order_status(
    id: i64,
    status: PaymentStatus,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as(
        r#"
            UPDATE orders
            SET status = $1, updated_at = $2
            WHERE id = $3
            RETURNING *;
        "#,
    )
    .bind(status)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(order)
}
