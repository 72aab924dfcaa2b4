//! Health Check Handlers
//!
//! Provides health check endpoints for Kubernetes-style liveness and readiness probes.
//!
//! # Endpoints
//! - `GET /health` - Database reachability, `{"up": ..., "result": {...}}`
//! - `GET /health/live` - Liveness probe (is the server running?)
//! - `GET /health/ready` - Readiness probe (database and job broker reachable?)

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::infrastructure::database;
use crate::startup::AppState;

/// Server start time for uptime calculation
static SERVER_START: Lazy<Instant> = Lazy::new(Instant::now);
static SERVER_START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Initialize the server start time (call during startup)
pub fn init_server_start() {
    Lazy::force(&SERVER_START);
    Lazy::force(&SERVER_START_TIME);
}

const ACCESSIBLE: &str = "Accessible";
const NOT_ACCESSIBLE: &str = "Not accessible";

/// Basic health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub up: bool,
    pub result: BTreeMap<&'static str, &'static str>,
}

/// Readiness response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub checks: HealthChecks,
}

/// Individual dependency checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: ServiceHealth,
    pub queue: ServiceHealth,
}

/// Health status for individual services
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Overall health status
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Simple liveness response
#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
}

/// Database health check, 503 when the database cannot be reached
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let up = database::ping(&state.db).await.is_ok();

    let mut result = BTreeMap::new();
    result.insert("database", if up { ACCESSIBLE } else { NOT_ACCESSIBLE });

    let status_code = if up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(HealthResponse { up, result }))
}

/// Liveness probe - checks if the server is running
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: "alive" })
}

/// Readiness probe - returns 503 if the database or job broker is unavailable
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let database = check("database", database::ping(&state.db)).await;
    let queue = check(state.queue.backend(), state.queue.ping()).await;

    let overall = determine_overall_status(&database, &queue);
    let response = ReadinessResponse {
        status: overall,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: SERVER_START.elapsed().as_secs(),
        started_at: SERVER_START_TIME.to_rfc3339(),
        checks: HealthChecks { database, queue },
    };

    let status_code = match overall {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Time a dependency probe
async fn check<E: std::fmt::Display>(
    name: &str,
    probe: impl std::future::Future<Output = Result<(), E>>,
) -> ServiceHealth {
    let start = Instant::now();
    match probe.await {
        Ok(()) => ServiceHealth {
            status: HealthStatus::Healthy,
            latency_ms: Some(start.elapsed().as_millis() as u64),
            message: None,
        },
        Err(e) => ServiceHealth {
            status: HealthStatus::Unhealthy,
            latency_ms: None,
            message: Some(format!("{} connection failed: {}", name, e)),
        },
    }
}

fn determine_overall_status(database: &ServiceHealth, queue: &ServiceHealth) -> HealthStatus {
    if database.status == HealthStatus::Healthy && queue.status == HealthStatus::Healthy {
        HealthStatus::Healthy
    } else {
        HealthStatus::Unhealthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health(status: HealthStatus) -> ServiceHealth {
        ServiceHealth {
            status,
            latency_ms: None,
            message: None,
        }
    }

    #[test]
    fn test_health_response_shape() {
        let mut result = BTreeMap::new();
        result.insert("database", ACCESSIBLE);
        let json = serde_json::to_value(HealthResponse { up: true, result }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"up": true, "result": {"database": "Accessible"}})
        );
    }

    #[test]
    fn test_any_unhealthy_dependency_fails_readiness() {
        assert_eq!(
            determine_overall_status(
                &health(HealthStatus::Healthy),
                &health(HealthStatus::Healthy)
            ),
            HealthStatus::Healthy
        );
        assert_eq!(
            determine_overall_status(
                &health(HealthStatus::Healthy),
                &health(HealthStatus::Unhealthy)
            ),
            HealthStatus::Unhealthy
        );
    }
}
