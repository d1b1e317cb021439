use aggregator::{Aggregator, SearchResponse};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use std::{collections::HashMap, sync::Arc};

pub fn build_router(aggregator: Arc<Aggregator>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/jobs", get(search_handler))
        .with_state(aggregator)
}

/// GET /api/jobs?keywords=&location=&source=
///
/// Always answers 200. A request that cannot be served turns into the
/// canned offers with `error` set.
async fn search_handler(
    State(aggregator): State<Arc<Aggregator>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<SearchResponse> {
    match aggregator.request_from_params(&params) {
        Ok(request) => Json(aggregator.search(&request).await),
        Err(e) => {
            log::error!("Job search API error: {}", e);
            Json(aggregator.degraded(params.get("keywords").map(String::as_str)))
        }
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn root_handler() -> &'static str {
    "Job search aggregator\n\nEndpoints:\n  GET /api/jobs?keywords=<words>&location=<place>&source=<all|jsearch|adzuna|google>\n  GET /health\n\nExample:\n  curl 'http://127.0.0.1:3000/api/jobs?keywords=react&source=all'"
}
