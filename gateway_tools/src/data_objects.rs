use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sps_common::Paise;

/// Body of a charge creation call. Amounts are already in minor currency units; the provider expects them that way.
#[derive(Debug, Clone, Serialize)]
pub struct ChargeRequest {
    pub amount: Paise,
    pub currency: String,
    pub receipt: String,
}

impl ChargeRequest {
    pub fn new<S: Into<String>>(amount: Paise, currency: S, receipt: S) -> Self {
        Self { amount, currency: currency.into(), receipt: receipt.into() }
    }
}

/// The charge record as the provider returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayCharge {
    pub id: String,
    pub amount: Paise,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: String,
    /// Creation time assigned by the provider, sent over the wire as a Unix timestamp.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}
