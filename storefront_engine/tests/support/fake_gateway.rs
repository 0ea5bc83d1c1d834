use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use sps_common::Paise;
use storefront_engine::{
    db_types::GatewayOrderId,
    traits::{GatewayError, PaymentGateway, RemoteCharge},
};

/// In-process stand-in for the remote payment provider. Hands out sequential charge ids and echoes the requested
/// amount back, optionally skewed to provoke the amount reconciliation check.
#[derive(Clone, Default)]
pub struct FakeGateway {
    counter: Arc<AtomicU64>,
    amount_skew: i64,
    unavailable: bool,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every charge opened by this instance reports `skew` paise more than was asked for.
    pub fn with_amount_skew(skew: i64) -> Self {
        Self { amount_skew: skew, ..Self::default() }
    }

    pub fn offline() -> Self {
        Self { unavailable: true, ..Self::default() }
    }
}

impl PaymentGateway for FakeGateway {
    async fn create_remote_charge(
        &self,
        amount: Paise,
        _currency: &str,
        _receipt: &str,
    ) -> Result<RemoteCharge, GatewayError> {
        if self.unavailable {
            return Err(GatewayError::Unavailable("connection refused".to_string()));
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(RemoteCharge {
            gateway_order_id: GatewayOrderId::from(format!("order_fake{n:06}")),
            amount: amount + Paise::from(self.amount_skew),
        })
    }
}
