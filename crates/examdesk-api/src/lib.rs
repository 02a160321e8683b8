#![allow(non_snake_case)]

pub mod middleware;
pub mod routes;

use axum::Router;

use crate::middleware::auth::AppState;

/// Everything under `/api/v1`: the session endpoints are public, the data
/// routes sit behind [`middleware::auth::require_api_auth`].
pub fn api_router(state: AppState) -> Router {
    routes::api_routes()
        .merge(middleware::auth::auth_routes())
        .with_state(state)
}
