//! Storefront payment engine
//!
//! The engine holds the provider-agnostic core of the storefront's checkout and payment verification flow. It is
//! divided into three sections:
//! 1. Database types and backend traits ([`db_types`], [`traits`]). The [`traits::PaymentLedger`] trait defines what a
//!    storage backend must provide; the bundled SQLite implementation ([`SqliteDatabase`]) is the default. You should
//!    never need to touch the database directly; go through the public API instead.
//! 2. The public API ([`OrderFlowApi`], [`AccountApi`]). `OrderFlowApi` orchestrates checkout (compute the total, open
//!    a remote charge, persist a pending order) and verification (check the gateway signature, settle the order
//!    exactly once). `AccountApi` serves order queries for consumers and admins.
//! 3. Helpers ([`helpers`]), most notably the gateway payment-confirmation signature check.
mod api;
pub mod db_types;
pub mod helpers;
mod sqlite;
pub mod traits;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;

pub use api::{
    accounts_api::AccountApi,
    errors::OrderFlowError,
    order_flow_api::OrderFlowApi,
    order_objects::{CheckoutResult, OrderResult, OrderWithCustomer},
};
