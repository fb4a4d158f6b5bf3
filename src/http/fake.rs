//! In-memory stand-in for a Kong node's Admin API, mounted on a wiremock
//! server so client tests can exercise create/list/get/delete sequences.

use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use wiremock::{Request, Respond, ResponseTemplate};

use crate::models::{RouteDefinition, RouteList};

pub struct FakeAdmin {
    version: String,
    routes: Mutex<Vec<RouteDefinition>>,
    next_id: AtomicU64,
}

impl FakeAdmin {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            routes: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn create(&self, body: &[u8]) -> ResponseTemplate {
        let raw: serde_json::Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(_) => {
                return ResponseTemplate::new(400)
                    .set_body_json(json!({"message": "Cannot parse JSON body"}))
            }
        };
        if raw.get("id").is_some() {
            return ResponseTemplate::new(400).set_body_json(json!({"id": "id is not allowed"}));
        }
        let mut route: RouteDefinition = match serde_json::from_value(raw) {
            Ok(route) => route,
            Err(_) => {
                return ResponseTemplate::new(400)
                    .set_body_json(json!({"name": "name is required"}))
            }
        };

        let mut routes = self.routes.lock().unwrap();
        if routes.iter().any(|r| r.name == route.name) {
            return ResponseTemplate::new(409).set_body_json(
                json!({"name": format!("already exists with value '{}'", route.name)}),
            );
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        route.id = Some(format!("00000000-0000-0000-0000-{id:012}"));
        routes.push(route.clone());

        ResponseTemplate::new(201).set_body_json(&route)
    }
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"}))
}

impl Respond for FakeAdmin {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let segments: Vec<String> = request
            .url
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        match (request.method.as_str(), segments.as_slice()) {
            ("GET", []) => ResponseTemplate::new(200)
                .set_body_json(json!({"version": self.version, "tagline": "Welcome to kong"})),
            ("GET", ["apis"]) => {
                let routes = self.routes.lock().unwrap();
                let list = RouteList {
                    total: routes.len(),
                    data: routes.clone(),
                };
                ResponseTemplate::new(200).set_body_json(&list)
            }
            ("POST", ["apis"]) => self.create(&request.body),
            ("GET", ["apis", name]) => {
                let routes = self.routes.lock().unwrap();
                match routes.iter().find(|r| r.name == *name) {
                    Some(route) => ResponseTemplate::new(200).set_body_json(route),
                    None => not_found(),
                }
            }
            ("DELETE", ["apis", name]) => {
                let mut routes = self.routes.lock().unwrap();
                let before = routes.len();
                routes.retain(|r| r.name != *name);
                if routes.len() < before {
                    ResponseTemplate::new(204)
                } else {
                    not_found()
                }
            }
            _ => {
                ResponseTemplate::new(405).set_body_json(json!({"message": "Method not allowed"}))
            }
        }
    }
}
