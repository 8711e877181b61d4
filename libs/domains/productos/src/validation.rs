//! Payload checks.
//!
//! Creation is strict: presence is checked before types, each in
//! [`CAMPOS_OBLIGATORIOS`] order, and the first failure wins. Updates are
//! lenient: values are cast to the field types when they can be.

use crate::error::{ProductoError, ProductoResult};
use crate::models::{ActualizarProducto, NuevoProducto};
use serde_json::{Map, Number, Value};

/// Required fields, in the order they are checked
pub const CAMPOS_OBLIGATORIOS: [&str; 7] = [
    "nombre_producto",
    "descripcion",
    "color",
    "precio_venta",
    "costo_produccion",
    "stock_disponible",
    "imagen",
];

pub(crate) const CAMPOS_TEXTO: [&str; 4] = ["nombre_producto", "descripcion", "color", "imagen"];

pub(crate) const CAMPOS_NUMERICOS: [&str; 3] =
    ["precio_venta", "costo_produccion", "stock_disponible"];

pub const TIPOS_INCORRECTOS: &str = "Los tipos de datos de los campos son incorrectos.";

pub fn campo_obligatorio(campo: &str) -> String {
    format!("El campo {campo} es obligatorio.")
}

/// Check a raw creation body and extract the typed record.
///
/// A body that is not a JSON object has no keys, so the first field is
/// reported missing. `null` fails the type check.
pub fn validar_nuevo_producto(data: &Value) -> ProductoResult<NuevoProducto> {
    let empty = Map::new();
    let fields = data.as_object().unwrap_or(&empty);

    if let Some(missing) = CAMPOS_OBLIGATORIOS
        .iter()
        .find(|campo| !fields.contains_key(**campo))
    {
        return Err(ProductoError::Validation(campo_obligatorio(missing)));
    }

    typed(fields).ok_or_else(|| ProductoError::Validation(TIPOS_INCORRECTOS.to_string()))
}

fn typed(fields: &Map<String, Value>) -> Option<NuevoProducto> {
    let text = |campo: &str| fields.get(campo)?.as_str().map(str::to_string);
    let number = |campo: &str| fields.get(campo)?.as_f64();

    Some(NuevoProducto {
        nombre_producto: text("nombre_producto")?,
        descripcion: text("descripcion")?,
        color: text("color")?,
        precio_venta: number("precio_venta")?,
        costo_produccion: number("costo_produccion")?,
        stock_disponible: number("stock_disponible")?,
        imagen: text("imagen")?,
    })
}

/// Cast a raw update body into a patch.
///
/// Text fields accept strings, numbers and booleans in their display form.
/// Numeric fields accept numbers, numeric strings and booleans (1 or 0).
/// `null` and blank numeric strings leave the field unchanged, and unknown
/// fields are ignored. Anything else is a [`ProductoError::Decode`].
pub fn castear_actualizacion(data: &Value) -> ProductoResult<ActualizarProducto> {
    let fields = data
        .as_object()
        .ok_or_else(|| ProductoError::Decode(format!("update body is not an object: {data}")))?;

    let text = |campo: &str| fields.get(campo).map_or(Ok(None), |v| como_texto(campo, v));
    let number = |campo: &str| fields.get(campo).map_or(Ok(None), |v| como_numero(campo, v));

    Ok(ActualizarProducto {
        nombre_producto: text("nombre_producto")?,
        descripcion: text("descripcion")?,
        color: text("color")?,
        precio_venta: number("precio_venta")?,
        costo_produccion: number("costo_produccion")?,
        stock_disponible: number("stock_disponible")?,
        imagen: text("imagen")?,
    })
}

fn como_texto(campo: &str, value: &Value) -> ProductoResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(numero_como_texto(n))),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(sin_conversion(campo, other, "string")),
    }
}

// 5.0 renders as "5", like the integer 5
fn numero_como_texto(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

fn como_numero(campo: &str, value: &Value) -> ProductoResult<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| sin_conversion(campo, value, "number")),
        Value::Bool(b) => Ok(Some(if *b { 1.0 } else { 0.0 })),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Some)
            .ok_or_else(|| sin_conversion(campo, value, "number")),
        other => Err(sin_conversion(campo, other, "number")),
    }
}

fn sin_conversion(campo: &str, value: &Value, tipo: &str) -> ProductoError {
    ProductoError::Decode(format!("{campo}: cannot cast {value} to {tipo}"))
}
