//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use kong_admin::models::RouteDefinition;

/// Kong Admin API client
#[derive(Parser, Debug)]
#[command(name = "kong-admin")]
#[command(author = "hephaex@gmail.com")]
#[command(version)]
#[command(about = "Inspect and manage APIs on a Kong node through its Admin API")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Kong Admin API URL (overrides config and KONG_ADMIN_URL)
    #[arg(short, long, global = true)]
    pub admin_url: Option<String>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, json-pretty, csv)
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Enable verbose output (same as --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored table output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the Kong node version
    Version,

    /// List APIs
    List,

    /// Show a single API
    Get {
        /// API name
        name: String,
    },

    /// Create an API
    Add(AddArgs),

    /// Delete an API
    Delete {
        /// API name
        name: String,
    },

    /// Show supported environment variables
    Env,

    /// Write the effective configuration to a file
    Init {
        /// Output file (.yaml/.yml or .json)
        #[arg(short, long, default_value = "kong-admin.yaml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Arguments for add command
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// API name
    #[arg(short, long)]
    pub name: String,

    /// Upstream URL requests are proxied to
    #[arg(short, long)]
    pub upstream_url: Option<String>,

    /// Forward the client's Host header upstream
    #[arg(long)]
    pub preserve_host: bool,

    /// Request path to match (Kong 0.9.x and earlier)
    #[arg(long)]
    pub request_path: Option<String>,

    /// Request host to match (Kong 0.9.x and earlier)
    #[arg(long)]
    pub request_host: Option<String>,

    /// Strip the matched request path (Kong 0.9.x and earlier)
    #[arg(long)]
    pub strip_request_path: bool,

    /// Host pattern to match, repeatable (Kong 0.10.x and later)
    #[arg(long = "host")]
    pub hosts: Vec<String>,

    /// Path pattern to match, repeatable (Kong 0.10.x and later)
    #[arg(long = "uri")]
    pub uris: Vec<String>,

    /// Strip the matched uri (Kong 0.10.x and later)
    #[arg(long)]
    pub strip_uri: bool,
}

impl AddArgs {
    pub fn into_route(self) -> RouteDefinition {
        RouteDefinition {
            id: None,
            name: self.name,
            upstream_url: self.upstream_url,
            preserve_host: self.preserve_host,
            request_path: self.request_path,
            request_host: self.request_host,
            strip_request_path: self.strip_request_path,
            hosts: self.hosts,
            uris: self.uris,
            strip_uri: self.strip_uri,
        }
    }
}
