//! Router assembly: operational routes at the root, entity groups under `/api/v1`.

pub mod api;
pub mod common;

pub use api::{api_routes, crud_routes};
pub use common::common_routes;

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::OriginalUri, Router};
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

pub const API_PREFIX: &str = "/api/v1";

/// The complete application: every route plus request tracing and the body size cap.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest(API_PREFIX, api_routes(&state.services))
        .fallback(unmatched)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit)),
        )
}

async fn unmatched(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}
