//! # Payment confirmation signature format
//!
//! When the shopper completes a payment in the provider's checkout widget, the provider hands the client three
//! values: the gateway order id (assigned when the charge was opened), a gateway payment id, and a signature. The
//! client posts all three back to us, and we must not trust any of it until the signature checks out.
//!
//! The signature is `hex(HMAC-SHA256(secret, "{gateway_order_id}|{gateway_payment_id}"))`, keyed with the shared
//! secret issued to the merchant by the provider. Since only the provider and this server know the secret, a valid
//! signature proves that the (order id, payment id) pair really was settled by the provider and was not fabricated
//! or spliced together from two different payments.
//!
//! Verification must be constant-time. The comparison goes through [`Mac::verify_slice`], never `==` on the hex
//! strings.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sps_common::Secret;
use thiserror::Error;

use crate::db_types::GatewayOrderId;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Error)]
#[error("Invalid payment signature: {0}")]
pub struct PaymentSignatureError(String);

impl From<String> for PaymentSignatureError {
    fn from(e: String) -> Self {
        Self(e)
    }
}

/// The client-supplied payment result, exactly as posted to the verification endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub gateway_order_id: GatewayOrderId,
    pub gateway_payment_id: String,
    pub signature: String,
}

impl PaymentConfirmation {
    pub fn new<S: Into<String>>(gateway_order_id: GatewayOrderId, gateway_payment_id: S, signature: S) -> Self {
        Self { gateway_order_id, gateway_payment_id: gateway_payment_id.into(), signature: signature.into() }
    }

    /// The message the provider signed: `"{gateway_order_id}|{gateway_payment_id}"` as UTF-8.
    pub fn message(&self) -> String {
        format!("{}|{}", self.gateway_order_id.as_str(), self.gateway_payment_id)
    }

    /// Recomputes the expected HMAC and compares it against the supplied signature in constant time.
    ///
    /// A signature that is not valid hex fails verification like any other forgery; it never causes an error.
    pub fn is_valid(&self, secret: &Secret<String>) -> bool {
        let supplied = match hex::decode(&self.signature) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        let mut mac = match HmacSha256::new_from_slice(secret.reveal().as_bytes()) {
            Ok(mac) => mac,
            Err(_) => return false,
        };
        mac.update(self.message().as_bytes());
        mac.verify_slice(&supplied).is_ok()
    }
}

/// Produces the provider-side signature for a (gateway order id, payment id) pair.
///
/// The server never needs this to verify payments; it exists for tooling and tests that have to play the role of
/// the provider.
pub fn sign_confirmation(
    gateway_order_id: &GatewayOrderId,
    gateway_payment_id: &str,
    secret: &Secret<String>,
) -> Result<String, PaymentSignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret.reveal().as_bytes())
        .map_err(|e| PaymentSignatureError(format!("Cannot build HMAC from key: {e}")))?;
    mac.update(format!("{}|{}", gateway_order_id.as_str(), gateway_payment_id).as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
