use actix_web::{web, HttpResponse};
use chrono::Utc;
use resilience::{presets, with_timeout_result};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;

use crate::services::JokeService;

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Serialize)]
struct ComponentCheck {
    status: ComponentStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
}

#[derive(Serialize)]
struct CacheState {
    valid: bool,
    records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    age_secs: Option<u64>,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    status: ComponentStatus,
    checks: HashMap<String, ComponentCheck>,
    cache: CacheState,
    timestamp: String,
}

pub async fn health_summary() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

/// Ready while jokes can be served: the database answers, or it does not
/// but cached jokes exist to fall back on (degraded).
pub async fn readiness_summary(service: web::Data<JokeService>) -> HttpResponse {
    let probe = presets::health_check_config();

    let start = Instant::now();
    let pg_result = with_timeout_result(probe.duration, service.source().ping()).await;
    let latency_ms = Some(start.elapsed().as_millis() as u64);

    let entry = service.cache().peek();
    let cache = CacheState {
        valid: service.cache().is_valid(),
        records: entry.data.len(),
        age_secs: entry.age().map(|age| age.as_secs()),
    };

    let (status, database_check) = match pg_result {
        Ok(()) => (
            ComponentStatus::Healthy,
            ComponentCheck {
                status: ComponentStatus::Healthy,
                message: "PostgreSQL connection successful".to_string(),
                latency_ms,
            },
        ),
        Err(e) => {
            let status = if entry.is_empty() {
                ComponentStatus::Unhealthy
            } else {
                ComponentStatus::Degraded
            };
            (
                status,
                ComponentCheck {
                    status: ComponentStatus::Unhealthy,
                    message: format!("PostgreSQL check failed: {}", e),
                    latency_ms,
                },
            )
        }
    };

    let mut checks = HashMap::new();
    checks.insert("postgresql".to_string(), database_check);

    let ready = status != ComponentStatus::Unhealthy;
    let response = ReadinessResponse {
        ready,
        status,
        checks,
        cache,
        timestamp: Utc::now().to_rfc3339(),
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
