//! Application state management.
//!
//! The state contains:
//! - Configuration
//! - MongoDB client
//! - The catalog service

use domain_productos::{MongoProductoRepository, ProductoService};
use mongodb::Client;

/// Shared application state.
///
/// Cloned into handlers; every clone shares one connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// Catalog service over the configured collection
    pub productos: ProductoService<MongoProductoRepository>,
}
