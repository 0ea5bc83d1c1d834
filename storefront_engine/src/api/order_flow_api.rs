use std::fmt::Debug;

use chrono::Utc;
use log::*;
use sps_common::{Paise, Secret};

use crate::{
    api::{errors::OrderFlowError, order_objects::CheckoutResult},
    db_types::{LineItem, NewOrder, Order, PaymentStatus, ShippingAddress},
    helpers::PaymentConfirmation,
    traits::{MarkPaidOutcome, PaymentGateway, PaymentLedger},
};

/// `OrderFlowApi` is the primary API for the checkout and payment verification flows.
///
/// It owns nothing global: the ledger backend, the gateway adapter and the provider's shared secret are all injected
/// at construction, so the whole flow can run against test doubles.
pub struct OrderFlowApi<B, G> {
    db: B,
    gateway: G,
    gateway_secret: Secret<String>,
}

impl<B, G> Debug for OrderFlowApi<B, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B, G> OrderFlowApi<B, G> {
    pub fn new(db: B, gateway: G, gateway_secret: Secret<String>) -> Self {
        Self { db, gateway, gateway_secret }
    }
}

impl<B, G> OrderFlowApi<B, G>
where
    B: PaymentLedger,
    G: PaymentGateway,
{
    /// Run the checkout flow for an authenticated consumer.
    ///
    /// The total is computed server-side as the exact sum of `unit_price * quantity` over the line items, in integer
    /// minor units; client-supplied totals are never accepted. A remote charge is then opened with the provider, and
    /// only if the provider confirms the same amount is a `Pending` order persisted. Order of operations matters:
    /// validation failures happen before the remote call, and a failed remote call leaves no local record behind.
    pub async fn checkout(
        &self,
        customer_id: i64,
        items: Vec<LineItem>,
        address: ShippingAddress,
    ) -> Result<CheckoutResult, OrderFlowError> {
        validate_line_items(&items)?;
        let total = order_total(&items)?;
        debug!("🛒️ Checkout for consumer #{customer_id}: {} items totalling {total}", items.len());
        let receipt = format!("rcpt_{}", Utc::now().timestamp_millis());
        let currency = sps_common::INR_CURRENCY_CODE;
        let charge = self.gateway.create_remote_charge(total, currency, &receipt).await.map_err(|e| {
            warn!("🛒️ Could not open a remote charge for consumer #{customer_id}. {e}");
            e
        })?;
        if charge.amount != total {
            warn!(
                "🛒️ Gateway confirmed {} for charge {} but we computed {total}. Aborting before persisting.",
                charge.amount, charge.gateway_order_id
            );
            return Err(OrderFlowError::GatewayInconsistency { expected: total, confirmed: charge.amount });
        }
        let new_order =
            NewOrder::new(customer_id, items, total, charge.gateway_order_id).with_shipping_address(address);
        let order = self.db.insert_order(new_order).await?;
        info!(
            "🛒️ Order #{} created for consumer #{customer_id}: {} pending under gateway reference {}",
            order.id, order.total_price, order.gateway_order_id
        );
        Ok(CheckoutResult {
            gateway_order_id: order.gateway_order_id,
            amount: order.total_price,
            internal_order_id: order.id,
        })
    }

    /// Verify a client-submitted payment confirmation and settle the matching order.
    ///
    /// The gateway signature is checked first, in constant time; nothing is looked up, let alone mutated, on a
    /// mismatch. Settling is idempotent: a repeat confirmation for an already-paid order (or losing a concurrent
    /// race) reports success without touching the stored payment id.
    pub async fn verify_payment(&self, confirmation: PaymentConfirmation) -> Result<Order, OrderFlowError> {
        if !confirmation.is_valid(&self.gateway_secret) {
            warn!("💳️ Rejected payment confirmation for {}: signature mismatch", confirmation.gateway_order_id);
            return Err(OrderFlowError::SignatureMismatch);
        }
        let outcome =
            self.db.mark_order_paid(&confirmation.gateway_order_id, &confirmation.gateway_payment_id).await?;
        match &outcome {
            MarkPaidOutcome::Updated(order) => {
                info!("💳️ Order #{} settled by payment {}", order.id, confirmation.gateway_payment_id);
            },
            MarkPaidOutcome::AlreadyPaid(order) => {
                debug!("💳️ Order #{} was already settled; confirmation is a no-op", order.id);
            },
        }
        Ok(outcome.into_order())
    }

    /// Administrative status override. Trusted operator input; bypasses the state machine on purpose (this is how an
    /// order gets marked `Failed`, for instance).
    pub async fn override_order_status(
        &self,
        order_id: i64,
        status: PaymentStatus,
    ) -> Result<Order, OrderFlowError> {
        info!("🛠️ Operator override: order #{order_id} -> {status}");
        let order = self.db.override_order_status(order_id, status).await?;
        Ok(order)
    }
}

/// Sums the line totals with overflow checks. A cart whose total does not fit in 64-bit paise is a bad request, not
/// a wrapped (and possibly negative) charge amount.
fn order_total(items: &[LineItem]) -> Result<Paise, OrderFlowError> {
    items.iter().try_fold(Paise::default(), |acc, item| {
        item.line_total()
            .and_then(|line| acc.checked_add(line))
            .ok_or_else(|| OrderFlowError::InvalidRequest(format!("Cart total overflows at line item {}", item.product_id)))
    })
}

fn validate_line_items(items: &[LineItem]) -> Result<(), OrderFlowError> {
    if items.is_empty() {
        return Err(OrderFlowError::InvalidRequest("Cannot check out an empty cart".to_string()));
    }
    for item in items {
        if item.quantity <= 0 {
            return Err(OrderFlowError::InvalidRequest(format!(
                "Line item {} has non-positive quantity {}",
                item.product_id, item.quantity
            )));
        }
        if !item.unit_price.is_positive() {
            return Err(OrderFlowError::InvalidRequest(format!(
                "Line item {} has non-positive unit price {}",
                item.product_id, item.unit_price
            )));
        }
    }
    Ok(())
}
