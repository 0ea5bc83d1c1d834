use gateway_tools::{GatewayApi, GatewayApiError, GatewayConfig};
use log::*;
use sps_common::Paise;
use storefront_engine::{
    db_types::GatewayOrderId,
    traits::{GatewayError, PaymentGateway, RemoteCharge},
};

/// Adapts the provider REST client to the engine's [`PaymentGateway`] trait.
#[derive(Clone)]
pub struct RemoteGateway {
    api: GatewayApi,
}

impl RemoteGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayApiError> {
        let api = GatewayApi::new(config)?;
        Ok(Self { api })
    }
}

impl PaymentGateway for RemoteGateway {
    async fn create_remote_charge(
        &self,
        amount: Paise,
        currency: &str,
        receipt: &str,
    ) -> Result<RemoteCharge, GatewayError> {
        let charge = self.api.create_charge(amount, currency, receipt).await.map_err(|e| {
            warn!("🌐️ Charge creation failed. {e}");
            GatewayError::Unavailable(e.to_string())
        })?;
        Ok(RemoteCharge { gateway_order_id: GatewayOrderId::from(charge.id), amount: charge.amount })
    }
}
