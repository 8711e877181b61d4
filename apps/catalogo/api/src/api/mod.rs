//! API routes module

pub mod health;
pub mod productos;

use axum::Router;

use crate::state::AppState;

pub use health::ready_router;

/// Create all API routes. Served at the root by `create_router`.
pub fn routes(state: &AppState) -> Router {
    Router::new().merge(productos::router(state))
}
