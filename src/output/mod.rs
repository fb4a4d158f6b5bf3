//! Output formatting module
//!
//! Renders versions and routes for the command line.

mod formatter;

pub use formatter::{OutputFormat, RouteFormatter};
