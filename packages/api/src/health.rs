// ABOUTME: Liveness and banner endpoints
// ABOUTME: Report service name, version and current time

use axum::{response::Json, Extension};
use chrono::Utc;
use serde_json::{json, Value};

/// Identity reported by the health and banner endpoints
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub project_name: String,
    pub version: String,
}

impl ServiceInfo {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

pub async fn health_check(Extension(service): Extension<ServiceInfo>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": service.project_name,
        "version": service.version,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn root(Extension(service): Extension<ServiceInfo>) -> Json<Value> {
    Json(json!({
        "message": format!("Welcome to {}", service.project_name),
        "version": service.version,
    }))
}
