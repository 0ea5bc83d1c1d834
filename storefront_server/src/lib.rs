//! # Storefront payment server
//! This crate hosts the HTTP surface of the storefront's payment flow. It is responsible for:
//! * Authenticating callers via JWT bearer tokens and enforcing role-based access.
//! * Accepting checkout requests, delegating total calculation and charge creation to the engine.
//! * Accepting payment confirmations from the client and handing them to the engine for verification.
//! * Consumer and administrative order listings, plus the operator status override.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.

pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;

pub mod data_objects;
pub mod integrations;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
