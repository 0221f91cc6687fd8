/// HTTP handlers for joke-service
///
/// # Routes
///
/// - `GET /api/v1/jokes` - Joke list with cache-control hint
/// - `GET /api/v1/health` - Fixed status and current timestamp
/// - `GET /api/v1/health/ready` - Database reachability and cache state
/// - `GET /api/v1/health/live` - Liveness probe
/// - `GET /metrics` - Prometheus metrics
use actix_web::web;

pub mod health;
pub mod jokes;

pub use health::{health_summary, liveness_check, readiness_summary};
pub use jokes::get_jokes;

/// Register all routes. Expects `web::Data<JokeService>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/metrics", web::get().to(crate::metrics::serve_metrics))
        .service(
            web::scope("/api/v1")
                .route("/jokes", web::get().to(get_jokes))
                .route("/health", web::get().to(health_summary))
                .route("/health/ready", web::get().to(readiness_summary))
                .route("/health/live", web::get().to(liveness_check)),
        );
}
