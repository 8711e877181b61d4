use serde::{Deserialize, Serialize};
use strum::Display;
use utoipa::{IntoParams, ToSchema};

/// Default number of records returned by the first/last listings
pub const DEFAULT_LISTADO: u32 = 3;

/// Upper bound for the `limite` query parameter
pub const MAX_LISTADO: u32 = 100;

/// Catalog record as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Producto {
    /// Store-assigned identifier (24-char hex ObjectId)
    #[serde(rename = "_id", alias = "id")]
    #[schema(example = "66f1c0ffee0123456789abcd")]
    pub id: String,
    #[schema(example = "Taza de cerámica")]
    pub nombre_producto: String,
    #[schema(example = "Taza esmaltada de 350 ml")]
    pub descripcion: String,
    #[schema(example = "azul")]
    pub color: String,
    #[schema(example = 12.5)]
    pub precio_venta: f64,
    #[schema(example = 4.2)]
    pub costo_produccion: f64,
    #[schema(example = 40)]
    pub stock_disponible: f64,
    /// URL or path of the product image
    #[schema(example = "/img/taza-azul.png")]
    pub imagen: String,
}

/// A validated creation payload, without identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NuevoProducto {
    pub nombre_producto: String,
    pub descripcion: String,
    pub color: String,
    pub precio_venta: f64,
    pub costo_produccion: f64,
    pub stock_disponible: f64,
    pub imagen: String,
}

impl NuevoProducto {
    /// Attach the identifier the store assigned on insert.
    pub fn with_id(self, id: impl Into<String>) -> Producto {
        Producto {
            id: id.into(),
            nombre_producto: self.nombre_producto,
            descripcion: self.descripcion,
            color: self.color,
            precio_venta: self.precio_venta,
            costo_produccion: self.costo_produccion,
            stock_disponible: self.stock_disponible,
            imagen: self.imagen,
        }
    }
}

/// Partial update. Absent fields are left untouched; unknown fields
/// (including `_id`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActualizarProducto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_producto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio_venta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub costo_produccion: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_disponible: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagen: Option<String>,
}

impl ActualizarProducto {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite the fields present in this patch.
    pub fn apply_to(self, producto: &mut Producto) {
        if let Some(nombre_producto) = self.nombre_producto {
            producto.nombre_producto = nombre_producto;
        }
        if let Some(descripcion) = self.descripcion {
            producto.descripcion = descripcion;
        }
        if let Some(color) = self.color {
            producto.color = color;
        }
        if let Some(precio_venta) = self.precio_venta {
            producto.precio_venta = precio_venta;
        }
        if let Some(costo_produccion) = self.costo_produccion {
            producto.costo_produccion = costo_produccion;
        }
        if let Some(stock_disponible) = self.stock_disponible {
            producto.stock_disponible = stock_disponible;
        }
        if let Some(imagen) = self.imagen {
            producto.imagen = imagen;
        }
    }
}

/// Direction of the identifier sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Shape of a listing query against the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub sort_by_id: Option<SortDirection>,
    pub limit: Option<u32>,
}

impl ListQuery {
    /// Every record, in store-native order.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn sorted_by_id(mut self, direction: SortDirection) -> Self {
        self.sort_by_id = Some(direction);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Query parameters for `/productos/primeros` and `/productos/ultimos`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListadoParams {
    /// Number of records to return (default 3, max 100)
    #[param(minimum = 0, maximum = 100, example = 3)]
    pub limite: Option<u32>,
}

impl ListadoParams {
    pub fn resolved(&self) -> u32 {
        self.limite.unwrap_or(DEFAULT_LISTADO).min(MAX_LISTADO)
    }
}

/// `{ "message": ... }` acknowledgement body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MensajeRespuesta {
    #[schema(example = "Producto eliminado")]
    pub message: String,
}

impl MensajeRespuesta {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
