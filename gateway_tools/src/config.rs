use std::time::Duration;

use log::*;
use sps_common::Secret;

pub const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_url: String,
    pub key_id: String,
    /// Doubles as the HMAC key for payment confirmation signatures.
    pub key_secret: Secret<String>,
    /// Hard deadline on every outbound call.
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.razorpay.com".to_string(),
            key_id: String::default(),
            key_secret: Secret::default(),
            timeout: Duration::from_secs(DEFAULT_GATEWAY_TIMEOUT_SECS),
        }
    }
}

impl GatewayConfig {
    pub fn new_from_env_or_default() -> Self {
        let api_url = std::env::var("SPS_GATEWAY_API_URL").unwrap_or_else(|_| {
            warn!("SPS_GATEWAY_API_URL not set, using https://api.razorpay.com as default");
            "https://api.razorpay.com".to_string()
        });
        let key_id = std::env::var("SPS_GATEWAY_KEY_ID").unwrap_or_else(|_| {
            warn!("SPS_GATEWAY_KEY_ID not set, using (probably useless) default");
            "rzp_test_0000000000".to_string()
        });
        let key_secret = Secret::new(std::env::var("SPS_GATEWAY_KEY_SECRET").unwrap_or_else(|_| {
            warn!("SPS_GATEWAY_KEY_SECRET not set, using (probably useless) default");
            "00000000000000".to_string()
        }));
        let timeout = std::env::var("SPS_GATEWAY_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(DEFAULT_GATEWAY_TIMEOUT_SECS));
        Self { api_url, key_id, key_secret, timeout }
    }
}
