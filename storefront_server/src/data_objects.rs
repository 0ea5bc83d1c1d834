use std::fmt::Display;

use serde::{Deserialize, Serialize};
use storefront_engine::db_types::{LineItem, PaymentStatus, ShippingAddress};

/// Body of a checkout request. The total is never part of it; the server computes that itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<LineItem>,
    pub shipping_address: ShippingAddress,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusParams {
    pub status: PaymentStatus,
}

/// Acknowledgement body for endpoints that have nothing to return. Failures never use this; they surface as
/// `{"error": …}` through the `ResponseError` impl on `ServerError`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }
}
