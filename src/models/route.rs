//! Route definitions
//!
//! A route is what the Kong Admin API calls an "API": a named upstream
//! mapping with host/path matching rules. Two generations of matching fields
//! exist and either may be populated:
//!
//! - Kong 0.9.x and earlier: `request_path`, `request_host`, `strip_request_path`
//! - Kong 0.10.x and later: `hosts`, `uris`, `strip_uri`

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_none_or_empty(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Treat an explicit JSON `null` like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single route ("API") as stored by the gateway
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// Server-assigned identifier, absent until the route is created
    #[serde(default, skip_serializing_if = "is_none_or_empty")]
    pub id: Option<String>,

    /// Unique route name
    pub name: String,

    /// Target the gateway proxies to
    #[serde(default, skip_serializing_if = "is_none_or_empty")]
    pub upstream_url: Option<String>,

    /// Forward the client's Host header upstream
    #[serde(default, deserialize_with = "null_as_default")]
    pub preserve_host: bool,

    #[serde(default, skip_serializing_if = "is_none_or_empty")]
    pub request_path: Option<String>,

    #[serde(default, skip_serializing_if = "is_none_or_empty")]
    pub request_host: Option<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_false"
    )]
    pub strip_request_path: bool,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub hosts: Vec<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub uris: Vec<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_false"
    )]
    pub strip_uri: bool,
}

impl RouteDefinition {
    /// Create an empty definition with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn upstream_url(mut self, url: impl Into<String>) -> Self {
        self.upstream_url = Some(url.into());
        self
    }

    pub fn preserve_host(mut self, preserve: bool) -> Self {
        self.preserve_host = preserve;
        self
    }

    pub fn request_path(mut self, path: impl Into<String>) -> Self {
        self.request_path = Some(path.into());
        self
    }

    pub fn request_host(mut self, host: impl Into<String>) -> Self {
        self.request_host = Some(host.into());
        self
    }

    pub fn strip_request_path(mut self, strip: bool) -> Self {
        self.strip_request_path = strip;
        self
    }

    /// Add a host pattern
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.hosts.push(host.into());
        self
    }

    /// Add a path pattern
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uris.push(uri.into());
        self
    }

    pub fn strip_uri(mut self, strip: bool) -> Self {
        self.strip_uri = strip;
        self
    }

    /// Whether any pre-0.10 matching field is set
    pub fn uses_legacy_matching(&self) -> bool {
        !is_none_or_empty(&self.request_path) || !is_none_or_empty(&self.request_host)
    }

    /// Whether any 0.10+ matching field is set
    pub fn uses_modern_matching(&self) -> bool {
        !self.hosts.is_empty() || !self.uris.is_empty()
    }

    /// Copy of this definition suitable for a create request
    pub(crate) fn without_id(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }
}

/// One page of routes as returned by `GET /apis`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRouteList")]
pub struct RouteList {
    pub data: Vec<RouteDefinition>,
    pub total: usize,
}

impl RouteList {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Find a route by name
    pub fn find(&self, name: &str) -> Option<&RouteDefinition> {
        self.data.iter().find(|route| route.name == name)
    }

    /// Route names in response order
    pub fn names(&self) -> Vec<&str> {
        self.data.iter().map(|route| route.name.as_str()).collect()
    }
}

impl IntoIterator for RouteList {
    type Item = RouteDefinition;
    type IntoIter = std::vec::IntoIter<RouteDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

#[derive(Deserialize)]
struct RawRouteList {
    #[serde(default, deserialize_with = "routes_or_empty_object")]
    data: Vec<RouteDefinition>,
    #[serde(default)]
    total: Option<usize>,
}

impl From<RawRouteList> for RouteList {
    fn from(raw: RawRouteList) -> Self {
        let total = raw.total.unwrap_or(raw.data.len());
        Self {
            data: raw.data,
            total,
        }
    }
}

/// Older gateways encode an empty `data` array as `{}`; `null` also means empty.
fn routes_or_empty_object<'de, D>(deserializer: D) -> Result<Vec<RouteDefinition>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Routes {
        Null,
        List(Vec<RouteDefinition>),
        Object(serde_json::Map<String, serde_json::Value>),
    }

    match Routes::deserialize(deserializer)? {
        Routes::Null => Ok(Vec::new()),
        Routes::List(routes) => Ok(routes),
        Routes::Object(map) if map.is_empty() => Ok(Vec::new()),
        Routes::Object(_) => Err(de::Error::custom("expected an array of APIs")),
    }
}

/// Node information returned by `GET /`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
}
