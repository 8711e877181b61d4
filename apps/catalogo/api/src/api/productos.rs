//! Productos API routes
//!
//! Wires the productos domain to HTTP routes.

use axum::Router;
use domain_productos::{MongoProductoRepository, ProductoResult, ProductoService, handlers};
use mongodb::Database;

use crate::state::AppState;

/// Build the catalog service, installing the collection validator first
pub async fn service(
    db: Database,
    collection: &str,
) -> ProductoResult<ProductoService<MongoProductoRepository>> {
    let repository = MongoProductoRepository::with_collection(db, collection);
    repository.ensure_schema().await?;

    Ok(ProductoService::new(repository))
}

/// Create the catalog router
pub fn router(state: &AppState) -> Router {
    handlers::router(state.productos.clone())
}
