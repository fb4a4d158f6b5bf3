//! HTTP client module for the Kong Admin API
//!
//! Provides the admin client and its error type.

mod client;
mod error;
#[cfg(test)]
mod fake;

pub use client::GatewayClient;
pub use error::{AdminError, AdminResult, Operation};
