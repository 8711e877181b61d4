//! In-memory `ProductoRepository` for handler tests

use async_trait::async_trait;
use domain_productos::*;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Stores records in insertion order and assigns increasing 24-char hex ids,
/// mirroring how ObjectIds sort.
#[derive(Default)]
pub struct InMemoryProductoRepository {
    productos: Mutex<Vec<Producto>>,
    next_id: AtomicU64,
    failing: bool,
}

impl InMemoryProductoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the store were unreachable.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    fn check(&self, id: Option<&str>) -> ProductoResult<()> {
        if self.failing {
            return Err(ProductoError::Database("connection refused".to_string()));
        }
        match id {
            Some(id) if id.len() != 24 || !id.chars().all(|c| c.is_ascii_hexdigit()) => {
                Err(ProductoError::InvalidId(id.to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ProductoRepository for InMemoryProductoRepository {
    async fn find(&self, query: ListQuery) -> ProductoResult<Vec<Producto>> {
        self.check(None)?;
        let mut productos = self.productos.lock().unwrap().clone();

        match query.sort_by_id {
            Some(SortDirection::Ascending) => productos.sort_by(|a, b| a.id.cmp(&b.id)),
            Some(SortDirection::Descending) => productos.sort_by(|a, b| b.id.cmp(&a.id)),
            None => {}
        }
        if let Some(limit) = query.limit {
            productos.truncate(limit as usize);
        }
        Ok(productos)
    }

    async fn find_by_id(&self, id: &str) -> ProductoResult<Option<Producto>> {
        self.check(Some(id))?;
        let productos = self.productos.lock().unwrap();
        Ok(productos.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, producto: NuevoProducto) -> ProductoResult<Producto> {
        self.check(None)?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let producto = producto.with_id(format!("{n:024x}"));
        self.productos.lock().unwrap().push(producto.clone());
        Ok(producto)
    }

    async fn update_by_id(
        &self,
        id: &str,
        patch: ActualizarProducto,
    ) -> ProductoResult<Option<Producto>> {
        self.check(Some(id))?;
        let mut productos = self.productos.lock().unwrap();
        Ok(productos.iter_mut().find(|p| p.id == id).map(|p| {
            patch.apply_to(p);
            p.clone()
        }))
    }

    async fn delete_by_id(&self, id: &str) -> ProductoResult<bool> {
        self.check(Some(id))?;
        let mut productos = self.productos.lock().unwrap();
        let before = productos.len();
        productos.retain(|p| p.id != id);
        Ok(productos.len() < before)
    }

    async fn ping(&self) -> ProductoResult<()> {
        self.check(None)
    }
}
