//! kong-admin - command-line front end for the Kong Admin API
//!
//! ## Usage
//!
//! ```bash
//! # Show the node version
//! kong-admin --admin-url http://localhost:8001 version
//!
//! # List APIs as JSON
//! kong-admin list --format json
//!
//! # Create an API (Kong 0.10.x and later)
//! kong-admin add --name orders --upstream-url http://orders.internal --uri /orders
//!
//! # Create an API (Kong 0.9.x and earlier)
//! kong-admin add --name orders --upstream-url http://orders.internal --request-path /orders
//!
//! # Delete it again
//! kong-admin delete orders
//!
//! # Save the effective settings for later runs
//! kong-admin --admin-url http://kong:8001 init --output ~/.kong-admin.yaml
//! ```

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use kong_admin::config::{env_help, expand_path, AppConfig};
use kong_admin::output::{OutputFormat, RouteFormatter};
use kong_admin::utils::{init_logger, LogLevel};
use kong_admin::GatewayClient;

mod cli;

use cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(log_level(&args)?);

    if matches!(args.command, Command::Env) {
        println!("Environment Variables:\n\n{}", env_help());
        return Ok(());
    }

    let config = load_config(&args)?;

    let format = OutputFormat::from_str(&config.format)
        .ok_or_else(|| anyhow::anyhow!("Unknown output format: {}", config.format))?;
    let mut formatter = RouteFormatter::new(format);
    if args.no_color || !std::io::stdout().is_terminal() {
        formatter = formatter.no_color();
    }

    let client = GatewayClient::from_config(&config).context("Failed to create admin client")?;
    info!("Using Kong Admin API at {}", client.admin_url());

    run(&client, &config, &formatter, args.command).await
}

/// `-v` wins over `--log-level`
fn log_level(args: &Args) -> Result<LogLevel> {
    if args.verbose {
        return Ok(LogLevel::Debug);
    }
    match &args.log_level {
        Some(name) => {
            LogLevel::from_str(name).ok_or_else(|| anyhow::anyhow!("Unknown log level: {name}"))
        }
        None => Ok(LogLevel::from_verbose(false)),
    }
}

fn write_config(config: &AppConfig, output: &Path, force: bool) -> Result<()> {
    let path = expand_path(&output.to_string_lossy());
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    config.save(&path)?;
    println!("✓ Configuration file created: {}", path.display());
    Ok(())
}

/// Config file and environment, then command-line flags
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = AppConfig::resolve(args.config.as_deref())?;

    if let Some(url) = &args.admin_url {
        config.admin_url = url.clone();
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = Some(timeout);
    }
    if let Some(format) = &args.format {
        config.format = format.clone();
    }

    Ok(config)
}

async fn run(
    client: &GatewayClient,
    config: &AppConfig,
    formatter: &RouteFormatter,
    command: Command,
) -> Result<()> {
    match command {
        Command::Version => {
            let version = client.get_version().await?;
            println!("{}", formatter.format_version(&version));
        }
        Command::List => {
            let routes = client.list_routes().await?;
            info!("Fetched {} of {} APIs", routes.len(), routes.total);
            println!("{}", formatter.format_routes(&routes)?);
        }
        Command::Get { name } => {
            let route = client
                .get_route(&name)
                .await
                .with_context(|| format!("Failed to fetch API '{name}'"))?;
            println!("{}", formatter.format_route(&route)?);
        }
        Command::Add(add_args) => {
            let route = add_args.into_route();
            info!("Creating API {}", route.name);
            let created = client
                .add_route(&route)
                .await
                .with_context(|| format!("Failed to create API '{}'", route.name))?;
            println!("{}", formatter.format_route(&created)?);
        }
        Command::Delete { name } => {
            client
                .delete_route(&name)
                .await
                .with_context(|| format!("Failed to delete API '{name}'"))?;
            println!("{}", formatter.format_deleted(&name));
        }
        Command::Env => println!("{}", env_help()),
        Command::Init { output, force } => write_config(config, &output, force)?,
    }

    Ok(())
}
