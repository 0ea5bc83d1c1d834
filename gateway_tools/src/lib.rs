//! Client for the payment provider's REST API.
//!
//! The storefront only ever makes one kind of outbound call, opening a charge ("order" in provider parlance) for a
//! computed amount, but the client is written as a thin generic REST layer so that tooling can reach the rest of the
//! provider's surface without new plumbing.
mod api;
mod config;
mod error;

mod data_objects;

pub use api::GatewayApi;
pub use config::GatewayConfig;
pub use data_objects::{ChargeRequest, GatewayCharge};
pub use error::GatewayApiError;
