//! Health check endpoint support.
//!
//! A [`HealthIndicator`] probes one dependency; [`health_response`] runs a
//! single indicator and renders the aggregated JSON body:
//!
//! ```json
//! { "status": "UP", "checks": [ { "name": "db", "status": "UP", "duration_ms": 0 } ] }
//! ```
//!
//! The response is `200 OK` when every check is up and `503 Service
//! Unavailable` otherwise.

use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

/// Result of a single health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Up,
    Down(String),
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        matches!(self, HealthStatus::Up)
    }
}

/// A named health indicator.
pub trait HealthIndicator: Send + Sync {
    /// The name of this check (e.g. `"db"`).
    fn name(&self) -> &str;

    fn check(&self) -> impl std::future::Future<Output = HealthStatus> + Send;
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub checks: Vec<HealthCheck>,
}

impl HealthReport {
    pub fn is_up(&self) -> bool {
        self.status == "UP"
    }
}

/// Run `indicator` and build the report.
pub async fn run_check<H: HealthIndicator>(indicator: &H) -> HealthReport {
    let start = Instant::now();
    let status = indicator.check().await;
    let duration_ms = start.elapsed().as_millis() as u64;

    let check = match status {
        HealthStatus::Up => HealthCheck {
            name: indicator.name().to_string(),
            status: "UP",
            reason: None,
            duration_ms,
        },
        HealthStatus::Down(reason) => {
            tracing::warn!(check = indicator.name(), %reason, "health check failed");
            HealthCheck {
                name: indicator.name().to_string(),
                status: "DOWN",
                reason: Some(reason),
                duration_ms,
            }
        }
    };

    HealthReport {
        status: if check.status == "UP" { "UP" } else { "DOWN" },
        checks: vec![check],
    }
}

/// Run `indicator` and render the report as an HTTP response.
pub async fn health_response<H: HealthIndicator>(indicator: &H) -> Response {
    let report = run_check(indicator).await;
    let status = if report.is_up() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report)).into_response()
}
