use sps_common::Paise;
use thiserror::Error;

use crate::db_types::GatewayOrderId;

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The provider could not be reached, rejected the call, or the bounded timeout expired.
    #[error("Payment gateway unavailable: {0}")]
    Unavailable(String),
}

/// The provider's response to opening a charge.
#[derive(Debug, Clone)]
pub struct RemoteCharge {
    pub gateway_order_id: GatewayOrderId,
    /// The amount the provider has recorded for the charge. The reconciliation service refuses to persist an order
    /// if this diverges from the total it computed.
    pub amount: Paise,
}

/// Outbound interface to the payment provider.
///
/// Exactly one operation is needed: open a remote charge for a computed amount. Implementations must bound the call
/// with a timeout and surface expiry as [`GatewayError::Unavailable`] rather than hang the request task. The call is
/// made at most once per checkout; retrying blindly could open a duplicate remote charge, so any future retry logic
/// must pass an idempotency key through to the provider.
#[allow(async_fn_in_trait)]
pub trait PaymentGateway {
    async fn create_remote_charge(
        &self,
        amount: Paise,
        currency: &str,
        receipt: &str,
    ) -> Result<RemoteCharge, GatewayError>;
}
