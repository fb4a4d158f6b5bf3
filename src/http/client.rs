//! Kong Admin API client
//!
//! Every operation is one HTTP round trip: build the endpoint URL, send the
//! request, check the status code the operation expects, then decode the
//! JSON body.

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

use super::error::{AdminError, AdminResult, Operation};
use crate::config::AppConfig;
use crate::models::{RouteDefinition, RouteList, VersionInfo};

/// Client for a Kong node's Admin API
#[derive(Clone, Debug)]
pub struct GatewayClient {
    client: Client,
    admin_url: String,
    base: Url,
}

impl GatewayClient {
    /// Create a client with a default HTTP transport
    pub fn new(admin_url: &str) -> AdminResult<Self> {
        let client = Client::builder()
            .user_agent(AppConfig::default().user_agent)
            .build()
            .map_err(AdminError::HttpClient)?;

        Self::with_http_client(client, admin_url)
    }

    /// Create a client around a caller-built transport
    pub fn with_http_client(client: Client, admin_url: &str) -> AdminResult<Self> {
        let (admin_url, base) = parse_admin_url(admin_url)?;
        Ok(Self {
            client,
            admin_url,
            base,
        })
    }

    /// Create a client from application configuration
    pub fn from_config(config: &AppConfig) -> AdminResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(AdminError::HttpClient)?;

        Self::with_http_client(client, &config.admin_url)
    }

    /// Normalized admin base URL
    pub fn admin_url(&self) -> &str {
        &self.admin_url
    }

    /// Version of the Kong node
    pub async fn get_version(&self) -> AdminResult<String> {
        let operation = Operation::GetVersion;
        let body = self
            .execute(operation, self.request(Method::GET, self.base.clone()))
            .await?;

        let info: VersionInfo = decode(operation, &body)?;
        Ok(info.version)
    }

    /// List the routes the node knows about
    pub async fn list_routes(&self) -> AdminResult<RouteList> {
        let operation = Operation::ListRoutes;
        let body = self
            .execute(operation, self.request(Method::GET, self.endpoint(&["apis"])))
            .await?;

        decode(operation, &body)
    }

    /// Fetch a single route by name
    pub async fn get_route(&self, name: &str) -> AdminResult<RouteDefinition> {
        let operation = Operation::GetRoute;
        let body = self
            .execute(
                operation,
                self.request(Method::GET, self.route_endpoint(operation, name)?),
            )
            .await?;

        decode(operation, &body)
    }

    /// Create a route; the returned definition carries the server-assigned id
    pub async fn add_route(&self, route: &RouteDefinition) -> AdminResult<RouteDefinition> {
        let operation = Operation::AddRoute;
        let payload = serde_json::to_vec(&route.without_id())
            .map_err(|source| AdminError::Encode { operation, source })?;

        let request = self
            .request(Method::POST, self.endpoint(&["apis"]))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload);
        let body = self.execute(operation, request).await?;

        decode(operation, &body)
    }

    /// Delete a route by name
    pub async fn delete_route(&self, name: &str) -> AdminResult<()> {
        let operation = Operation::DeleteRoute;
        self.execute(
            operation,
            self.request(Method::DELETE, self.route_endpoint(operation, name)?),
        )
        .await?;

        Ok(())
    }

    /// Base URL with `segments` appended, each percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `{base}/apis/{name}`; names that would collapse into another path are refused
    fn route_endpoint(&self, operation: Operation, name: &str) -> AdminResult<Url> {
        if matches!(name, "" | "." | "..") {
            return Err(AdminError::InvalidRouteName {
                operation,
                name: name.to_string(),
            });
        }
        Ok(self.endpoint(&["apis", name]))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("Sending {} request to {}", method, url);
        self.client.request(method, url)
    }

    /// Send the request and return the body if the status matches
    async fn execute(&self, operation: Operation, request: RequestBuilder) -> AdminResult<String> {
        let start = Instant::now();

        let response = request
            .send()
            .await
            .map_err(|source| AdminError::Transport { operation, source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| AdminError::Transport { operation, source })?;

        debug!(
            "{}: {} in {}ms",
            operation,
            status,
            start.elapsed().as_millis()
        );

        if status != operation.expected_status() {
            return Err(AdminError::UnexpectedStatus {
                operation,
                status,
                body,
            });
        }

        Ok(body)
    }
}

fn decode<T: DeserializeOwned>(operation: Operation, body: &str) -> AdminResult<T> {
    serde_json::from_str(body).map_err(|source| AdminError::Decode { operation, source })
}

/// Trim surrounding whitespace and slashes, then require an http(s) URL
fn parse_admin_url(raw: &str) -> AdminResult<(String, Url)> {
    let trimmed = raw.trim_matches(|c: char| c == '/' || c.is_whitespace());

    let invalid = |reason: String| AdminError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }

    Ok((trimmed.to_string(), url))
}
