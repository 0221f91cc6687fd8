use actix_web::{http::header, web, HttpResponse};

use crate::error::Result;
use crate::services::JokeService;

/// Response header naming where the body came from (fresh | stale)
pub const CACHE_STATUS_HEADER: &str = "X-Cache-Status";

pub async fn get_jokes(service: web::Data<JokeService>) -> Result<HttpResponse> {
    let payload = service.get_jokes().await?;

    Ok(HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, payload.cache_control()))
        .insert_header((CACHE_STATUS_HEADER, payload.freshness.as_str()))
        .json(payload.jokes.as_ref()))
}
