//! Producto Service - catalog operations over a repository

use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{Operation, ProductoResult};
use crate::models::{ListQuery, Producto, SortDirection};
use crate::repository::ProductoRepository;
use crate::validation::{castear_actualizacion, validar_nuevo_producto};

/// Catalog service
///
/// Every store failure leaves this layer as `ProductoError::Unavailable`
/// tagged with the operation that failed.
pub struct ProductoService<R: ProductoRepository> {
    repository: Arc<R>,
}

impl<R: ProductoRepository> ProductoService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All records, in store-native order
    #[instrument(skip(self))]
    pub async fn list(&self) -> ProductoResult<Vec<Producto>> {
        self.repository
            .find(ListQuery::all())
            .await
            .map_err(|e| e.during(Operation::List))
    }

    /// `None` when no record has this identifier
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> ProductoResult<Option<Producto>> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| e.during(Operation::Fetch))
    }

    /// Validate a raw body and persist it.
    ///
    /// Validation runs before any store interaction.
    #[instrument(skip(self, data))]
    pub async fn create(&self, data: Value) -> ProductoResult<Producto> {
        let nuevo = validar_nuevo_producto(&data)?;

        self.repository
            .insert(nuevo)
            .await
            .map_err(|e| e.during(Operation::Create))
    }

    /// Apply a partial overwrite without presence checks.
    ///
    /// Values are cast to the field types; a body that cannot be cast
    /// counts as a store failure.
    #[instrument(skip(self, data))]
    pub async fn update(&self, id: &str, data: Value) -> ProductoResult<Option<Producto>> {
        let patch = castear_actualizacion(&data).map_err(|e| e.during(Operation::Update))?;

        self.repository
            .update_by_id(id, patch)
            .await
            .map_err(|e| e.during(Operation::Update))
    }

    /// Remove the record if present. Succeeds whether or not it existed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> ProductoResult<()> {
        let removed = self
            .repository
            .delete_by_id(id)
            .await
            .map_err(|e| e.during(Operation::Delete))?;

        if !removed {
            tracing::debug!(producto_id = %id, "Delete matched no record");
        }
        Ok(())
    }

    /// Up to `n` records, oldest first
    #[instrument(skip(self))]
    pub async fn list_first(&self, n: u32) -> ProductoResult<Vec<Producto>> {
        self.list_sorted(n, SortDirection::Ascending, Operation::ListFirst)
            .await
    }

    /// Up to `n` records, most recent first
    #[instrument(skip(self))]
    pub async fn list_last(&self, n: u32) -> ProductoResult<Vec<Producto>> {
        self.list_sorted(n, SortDirection::Descending, Operation::ListLast)
            .await
    }

    /// Check that the store is reachable
    pub async fn ping(&self) -> ProductoResult<()> {
        self.repository.ping().await
    }

    async fn list_sorted(
        &self,
        n: u32,
        direction: SortDirection,
        operation: Operation,
    ) -> ProductoResult<Vec<Producto>> {
        // The store reads a zero limit as "no limit".
        if n == 0 {
            return Ok(Vec::new());
        }

        let query = ListQuery::all().sorted_by_id(direction).limit(n);
        self.repository
            .find(query)
            .await
            .map_err(|e| e.during(operation))
    }
}

impl<R: ProductoRepository> Clone for ProductoService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductoError;
    use crate::models::{ActualizarProducto, NuevoProducto};
    use crate::repository::MockProductoRepository;
    use serde_json::json;

    fn nuevo() -> NuevoProducto {
        NuevoProducto {
            nombre_producto: "Taza".to_string(),
            descripcion: "Taza de cerámica".to_string(),
            color: "azul".to_string(),
            precio_venta: 12.5,
            costo_produccion: 4.0,
            stock_disponible: 40.0,
            imagen: "/img/taza.png".to_string(),
        }
    }

    fn producto(id: &str) -> Producto {
        nuevo().with_id(id)
    }

    fn body() -> Value {
        serde_json::to_value(nuevo()).unwrap()
    }

    fn unavailable_operation(err: ProductoError) -> Operation {
        match err {
            ProductoError::Unavailable { operation, .. } => operation,
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_passes_unshaped_query() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_find()
            .withf(|query| *query == ListQuery::all())
            .times(1)
            .returning(|_| Ok(vec![producto("a"), producto("b")]));

        let service = ProductoService::new(mock_repo);
        let result = service.list().await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_list_store_failure_is_unavailable() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_find()
            .returning(|_| Err(ProductoError::Database("timeout".to_string())));

        let service = ProductoService::new(mock_repo);
        let err = service.list().await.unwrap_err();

        assert_eq!(unavailable_operation(err), Operation::List);
    }

    #[tokio::test]
    async fn test_get_by_id_passes_absent_through() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_find_by_id()
            .withf(|id| id == "66f1c0ffee0123456789abcd")
            .returning(|_| Ok(None));

        let service = ProductoService::new(mock_repo);
        let result = service.get_by_id("66f1c0ffee0123456789abcd").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_invalid_identifier_is_unavailable() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Err(ProductoError::InvalidId(id.to_string())));

        let service = ProductoService::new(mock_repo);
        let err = service.get_by_id("xyz").await.unwrap_err();

        assert_eq!(unavailable_operation(err), Operation::Fetch);
    }

    #[tokio::test]
    async fn test_create_inserts_validated_record() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_insert()
            .withf(|p| *p == nuevo())
            .times(1)
            .returning(|p| Ok(p.with_id("66f1c0ffee0123456789abcd")));

        let service = ProductoService::new(mock_repo);
        let result = service.create(body()).await.unwrap();

        assert_eq!(result.id, "66f1c0ffee0123456789abcd");
        assert_eq!(result.nombre_producto, "Taza");
    }

    #[tokio::test]
    async fn test_create_validation_failure_skips_store() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo.expect_insert().never();

        let mut data = body();
        data.as_object_mut().unwrap().remove("costo_produccion");

        let service = ProductoService::new(mock_repo);
        let err = service.create(data).await.unwrap_err();

        match err {
            ProductoError::Validation(msg) => {
                assert_eq!(msg, "El campo costo_produccion es obligatorio.")
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_store_schema_rejection_is_kept() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo.expect_insert().returning(|_| {
            Err(ProductoError::StoreValidation(vec![
                "precio_venta: type did not match".to_string(),
            ]))
        });

        let service = ProductoService::new(mock_repo);
        let err = service.create(body()).await.unwrap_err();

        assert!(matches!(err, ProductoError::StoreValidation(ref m) if m.len() == 1));
    }

    #[tokio::test]
    async fn test_create_store_failure_is_unavailable() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_insert()
            .returning(|_| Err(ProductoError::Database("down".to_string())));

        let service = ProductoService::new(mock_repo);
        let err = service.create(body()).await.unwrap_err();

        assert_eq!(unavailable_operation(err), Operation::Create);
    }

    #[tokio::test]
    async fn test_update_forwards_partial_patch() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_update_by_id()
            .withf(|id, patch| {
                id == "66f1c0ffee0123456789abcd"
                    && *patch
                        == ActualizarProducto {
                            precio_venta: Some(999.0),
                            ..Default::default()
                        }
            })
            .times(1)
            .returning(|id, patch| {
                let mut p = producto(id);
                patch.apply_to(&mut p);
                Ok(Some(p))
            });

        let service = ProductoService::new(mock_repo);
        let result = service
            .update("66f1c0ffee0123456789abcd", json!({"precio_venta": 999}))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.precio_venta, 999.0);
        assert_eq!(result.color, "azul");
    }

    #[tokio::test]
    async fn test_update_uncastable_body_is_unavailable() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo.expect_update_by_id().never();

        let service = ProductoService::new(mock_repo);
        let err = service
            .update("66f1c0ffee0123456789abcd", json!({"precio_venta": "mucho"}))
            .await
            .unwrap_err();

        assert_eq!(unavailable_operation(err), Operation::Update);
    }

    #[tokio::test]
    async fn test_delete_succeeds_when_nothing_removed() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo.expect_delete_by_id().returning(|_| Ok(false));

        let service = ProductoService::new(mock_repo);
        assert!(service.delete("66f1c0ffee0123456789abcd").await.is_ok());
    }

    #[tokio::test]
    async fn test_list_first_and_last_shape_query() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_find()
            .withf(|q| *q == ListQuery::all().sorted_by_id(SortDirection::Ascending).limit(3))
            .times(1)
            .returning(|_| Ok(vec![producto("a")]));
        mock_repo
            .expect_find()
            .withf(|q| *q == ListQuery::all().sorted_by_id(SortDirection::Descending).limit(5))
            .times(1)
            .returning(|_| Ok(vec![producto("z")]));

        let service = ProductoService::new(mock_repo);

        assert_eq!(service.list_first(3).await.unwrap()[0].id, "a");
        assert_eq!(service.list_last(5).await.unwrap()[0].id, "z");
    }

    #[tokio::test]
    async fn test_zero_limit_skips_store() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo.expect_find().never();

        let service = ProductoService::new(mock_repo);

        assert!(service.list_first(0).await.unwrap().is_empty());
        assert!(service.list_last(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_last_failure_uses_its_operation() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_find()
            .returning(|_| Err(ProductoError::Database("down".to_string())));

        let service = ProductoService::new(mock_repo);
        let err = service.list_last(3).await.unwrap_err();

        assert_eq!(unavailable_operation(err), Operation::ListLast);
    }
}
