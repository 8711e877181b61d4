//! Productos Domain
//!
//! Product catalog stored in MongoDB: CRUD by identifier plus "first" and
//! "last" listings ordered by identifier.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (/producto, /productos/...)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Create-time validation, query shaping, error mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Producto and its payloads
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_productos::{handlers, MongoProductoRepository, ProductoService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoProductoRepository::new(client.database("catalogo"));
//! repository.ensure_schema().await?;
//!
//! let router = handlers::router(ProductoService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod validation;

pub use crate::mongodb::MongoProductoRepository;
pub use error::{Operation, ProductoError, ProductoResult};
pub use handlers::ApiDoc;
pub use models::{
    ActualizarProducto, ListQuery, ListadoParams, MensajeRespuesta, NuevoProducto, Producto,
    SortDirection,
};
pub use repository::ProductoRepository;
pub use service::ProductoService;
