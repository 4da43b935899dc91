use axum::Router;

pub mod system;
pub mod users;

/// Router for every resource endpoint.
pub fn router() -> Router {
    Router::new().nest(users::USERS_PATH, users::router())
}
