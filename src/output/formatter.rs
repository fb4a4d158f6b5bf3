//! Output formatters for Admin API results
//!
//! Provides Table, JSON and CSV output formats.

use std::io;

use anyhow::{Context, Result};

use crate::models::{RouteDefinition, RouteList};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Csv,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
            _ => None,
        }
    }
}

const CSV_HEADER: [&str; 9] = [
    "id",
    "name",
    "upstream_url",
    "preserve_host",
    "request_host",
    "request_path",
    "strip",
    "hosts",
    "uris",
];

/// Route formatter
pub struct RouteFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl RouteFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a node version
    pub fn format_version(&self, version: &str) -> String {
        match self.format {
            OutputFormat::Table => format!("Kong {version}"),
            OutputFormat::Json => serde_json::json!({ "version": version }).to_string(),
            OutputFormat::JsonPretty => {
                serde_json::to_string_pretty(&serde_json::json!({ "version": version }))
                    .unwrap_or_default()
            }
            OutputFormat::Csv => format!("version\n{version}\n"),
        }
    }

    /// Format a single route
    pub fn format_route(&self, route: &RouteDefinition) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Table => self.format_route_detail(route),
            OutputFormat::Json => serde_json::to_string(route).context("Failed to encode API")?,
            OutputFormat::JsonPretty => {
                serde_json::to_string_pretty(route).context("Failed to encode API")?
            }
            OutputFormat::Csv => format_csv(std::slice::from_ref(route))?,
        })
    }

    /// Format a page of routes
    pub fn format_routes(&self, list: &RouteList) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Table => self.format_routes_table(list),
            OutputFormat::Json => serde_json::to_string(list).context("Failed to encode APIs")?,
            OutputFormat::JsonPretty => {
                serde_json::to_string_pretty(list).context("Failed to encode APIs")?
            }
            OutputFormat::Csv => format_csv(&list.data)?,
        })
    }

    /// Confirmation line for a deleted route
    pub fn format_deleted(&self, name: &str) -> String {
        match self.format {
            OutputFormat::Json | OutputFormat::JsonPretty => {
                serde_json::json!({ "deleted": name }).to_string()
            }
            _ if self.colorize => format!("\x1b[32m✓\x1b[0m Deleted API {name}"),
            _ => format!("✓ Deleted API {name}"),
        }
    }

    fn format_route_detail(&self, route: &RouteDefinition) -> String {
        let label = |text: &str| {
            if self.colorize {
                format!("\x1b[1m{text:<20}\x1b[0m")
            } else {
                format!("{text:<20}")
            }
        };

        let mut lines = vec![
            format!("{}{}", label("name"), route.name),
            format!("{}{}", label("id"), route.id.as_deref().unwrap_or("-")),
            format!(
                "{}{}",
                label("upstream_url"),
                route.upstream_url.as_deref().unwrap_or("-")
            ),
            format!("{}{}", label("preserve_host"), route.preserve_host),
        ];

        if route.uses_legacy_matching() || !route.uses_modern_matching() {
            lines.push(format!(
                "{}{}",
                label("request_host"),
                route.request_host.as_deref().unwrap_or("-")
            ));
            lines.push(format!(
                "{}{}",
                label("request_path"),
                route.request_path.as_deref().unwrap_or("-")
            ));
            lines.push(format!(
                "{}{}",
                label("strip_request_path"),
                route.strip_request_path
            ));
        }
        if route.uses_modern_matching() {
            lines.push(format!("{}{}", label("hosts"), join_or_dash(&route.hosts)));
            lines.push(format!("{}{}", label("uris"), join_or_dash(&route.uris)));
            lines.push(format!("{}{}", label("strip_uri"), route.strip_uri));
        }

        lines.join("\n")
    }

    fn format_routes_table(&self, list: &RouteList) -> String {
        let rows: Vec<[String; 4]> = list
            .data
            .iter()
            .map(|route| {
                [
                    route.name.clone(),
                    route.upstream_url.clone().unwrap_or_else(|| "-".to_string()),
                    matching_summary(route),
                    route.id.clone().unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();

        let headers = ["NAME", "UPSTREAM", "MATCH", "ID"];
        let mut widths = headers.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let render = |cells: [&str; 4]| {
            cells
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut output = String::new();
        let header = render(headers);
        if self.colorize {
            output.push_str(&format!("\x1b[1m{header}\x1b[0m\n"));
        } else {
            output.push_str(&header);
            output.push('\n');
        }
        for row in &rows {
            let [name, upstream, matching, id] = row;
            output.push_str(&render([name, upstream, matching, id].map(String::as_str)));
            output.push('\n');
        }
        output.push_str(&format!("Total: {}", list.total));

        output
    }
}

/// Compact description of a route's matching rules
fn matching_summary(route: &RouteDefinition) -> String {
    let mut parts = Vec::new();
    if let Some(host) = route.request_host.as_deref().filter(|h| !h.is_empty()) {
        parts.push(format!("host={host}"));
    }
    if let Some(path) = route.request_path.as_deref().filter(|p| !p.is_empty()) {
        parts.push(format!("path={path}"));
    }
    if !route.hosts.is_empty() {
        parts.push(format!("hosts={}", route.hosts.join(",")));
    }
    if !route.uris.is_empty() {
        parts.push(format!("uris={}", route.uris.join(",")));
    }
    if route.strip_request_path || route.strip_uri {
        parts.push("strip".to_string());
    }

    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(" ")
    }
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

fn format_csv(routes: &[RouteDefinition]) -> Result<String> {
    let bytes = write_csv(Vec::new(), routes).context("Failed to write CSV")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

fn write_csv<W: io::Write>(out: W, routes: &[RouteDefinition]) -> csv::Result<W> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;

    for route in routes {
        let strip = route.strip_request_path || route.strip_uri;
        let hosts = route.hosts.join(";");
        let uris = route.uris.join(";");
        writer.write_record([
            route.id.as_deref().unwrap_or(""),
            route.name.as_str(),
            route.upstream_url.as_deref().unwrap_or(""),
            if route.preserve_host { "true" } else { "false" },
            route.request_host.as_deref().unwrap_or(""),
            route.request_path.as_deref().unwrap_or(""),
            if strip { "true" } else { "false" },
            hosts.as_str(),
            uris.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}
