//! Data models for the Kong Admin API
//!
//! Route definitions ("APIs" in Kong's terms) and the node info document.

mod route;

pub use route::{RouteDefinition, RouteList, VersionInfo};
