use async_trait::async_trait;

use crate::error::ProductoResult;
use crate::models::{ActualizarProducto, ListQuery, NuevoProducto, Producto};

/// Store access for the catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductoRepository: Send + Sync {
    /// Records matching `query`, honoring its sort and limit
    async fn find(&self, query: ListQuery) -> ProductoResult<Vec<Producto>>;

    async fn find_by_id(&self, id: &str) -> ProductoResult<Option<Producto>>;

    /// Persist a new record; the store assigns the identifier.
    ///
    /// Fails with `StoreValidation` when the store schema rejects it.
    async fn insert(&self, producto: NuevoProducto) -> ProductoResult<Producto>;

    /// Apply `patch` and return the post-update record, if it existed
    async fn update_by_id(
        &self,
        id: &str,
        patch: ActualizarProducto,
    ) -> ProductoResult<Option<Producto>>;

    /// Returns whether a record was removed
    async fn delete_by_id(&self, id: &str) -> ProductoResult<bool>;

    async fn ping(&self) -> ProductoResult<()>;
}
