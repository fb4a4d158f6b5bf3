//! Typed client for the Kong Admin API
//!
//! Query a Kong node's version and list, create, fetch or delete its APIs
//! (routes). Each call is one HTTP round trip with JSON bodies; the client
//! keeps no state between calls beyond its base URL and HTTP transport.
//!
//! Both generations of Kong's matching fields are modelled: `request_path`,
//! `request_host` and `strip_request_path` for 0.9.x and earlier, `hosts`,
//! `uris` and `strip_uri` for 0.10.x and later. Which group is required is
//! left to the server.
//!
//! ## Usage
//!
//! ```no_run
//! use kong_admin::{GatewayClient, RouteDefinition};
//!
//! # async fn run() -> kong_admin::AdminResult<()> {
//! let client = GatewayClient::new("http://localhost:8001")?;
//! println!("Kong {}", client.get_version().await?);
//!
//! let created = client
//!     .add_route(
//!         &RouteDefinition::new("kong-test-api")
//!             .request_path("/kong-test-api")
//!             .upstream_url("http://example.com"),
//!     )
//!     .await?;
//! println!("created {:?}", created.id);
//!
//! client.delete_route("kong-test-api").await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod http;
pub mod models;
pub mod output;
pub mod utils;

pub use config::AppConfig;
pub use http::{AdminError, AdminResult, GatewayClient, Operation};
pub use models::{RouteDefinition, RouteList, VersionInfo};
