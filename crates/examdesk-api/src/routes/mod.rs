pub mod exams;
pub mod users;

use axum::{middleware, Router};

use crate::middleware::auth::{require_api_auth, AppState};

pub fn api_routes() -> Router<AppState> {
    users::routes()
        .merge(exams::routes())
        .route_layer(middleware::from_fn(require_api_auth))
}
