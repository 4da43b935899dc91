//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: dependencies handed to handlers (repository, links, paging)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and entity mapping
//! - `negotiate.rs`: JSON/XML selection from `Accept`
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use roster_infra::users::UserRepository;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;

pub mod dto;
pub mod errors;
pub mod links;
pub mod negotiate;
pub mod routes;
pub mod services;

/// Build the full HTTP router over a fresh in-memory repository.
pub fn build_app(config: &ApiConfig) -> Router {
    router_with(Arc::new(services::AppServices::in_memory(config)))
}

/// Build the router over a caller-supplied repository.
pub fn build_app_with(users: Arc<dyn UserRepository>, config: &ApiConfig) -> Router {
    router_with(Arc::new(services::AppServices::with_repository(users, config)))
}

fn router_with(services: Arc<services::AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(services)),
        )
}
