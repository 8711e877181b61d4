//! MongoDB implementation of ProductoRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Bson, Document, doc, oid::ObjectId, to_document},
    error::{ErrorKind, WriteFailure},
    options::{FindOptions, ReturnDocument, ValidationLevel},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ProductoError, ProductoResult};
use crate::models::{ActualizarProducto, ListQuery, NuevoProducto, Producto, SortDirection};
use crate::repository::ProductoRepository;
use crate::validation::{CAMPOS_NUMERICOS, CAMPOS_OBLIGATORIOS, CAMPOS_TEXTO, campo_obligatorio};

pub const DEFAULT_COLLECTION: &str = "productos";

/// Server error code for a document rejected by the collection validator
const DOCUMENT_VALIDATION_FAILURE: i32 = 121;

/// Stored shape; the identifier is a native ObjectId
#[derive(Debug, Serialize, Deserialize)]
struct ProductoDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    nombre_producto: String,
    descripcion: String,
    color: String,
    precio_venta: f64,
    costo_produccion: f64,
    stock_disponible: f64,
    imagen: String,
}

impl From<ProductoDocument> for Producto {
    fn from(doc: ProductoDocument) -> Self {
        Producto {
            id: doc.id.to_hex(),
            nombre_producto: doc.nombre_producto,
            descripcion: doc.descripcion,
            color: doc.color,
            precio_venta: doc.precio_venta,
            costo_produccion: doc.costo_produccion,
            stock_disponible: doc.stock_disponible,
            imagen: doc.imagen,
        }
    }
}

pub struct MongoProductoRepository {
    db: Database,
    collection: Collection<ProductoDocument>,
}

impl MongoProductoRepository {
    /// Create a repository over the `productos` collection
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoProductoRepository::new(client.database("catalogo"));
    /// repo.ensure_schema().await?;
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductoDocument>(collection_name);
        Self { db, collection }
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    /// Install the `$jsonSchema` validator on the collection.
    ///
    /// Creates the collection when absent, otherwise replaces its validator
    /// with `collMod`. The level is `moderate`, so documents stored before the
    /// validator existed can still be updated.
    #[instrument(skip(self), fields(collection = %self.collection.name()))]
    pub async fn ensure_schema(&self) -> ProductoResult<()> {
        let name = self.collection.name();
        let existing = self
            .db
            .list_collection_names()
            .filter(doc! { "name": name })
            .await?;

        if existing.iter().any(|c| c == name) {
            self.db.run_command(coll_mod_command(name)).await?;
            tracing::info!("Collection validator updated");
        } else {
            self.db
                .create_collection(name)
                .validator(producto_schema())
                .validation_level(ValidationLevel::Moderate)
                .await?;
            tracing::info!("Collection created with validator");
        }

        Ok(())
    }

    fn object_id(id: &str) -> ProductoResult<ObjectId> {
        ObjectId::parse_str(id).map_err(|e| ProductoError::InvalidId(format!("{id}: {e}")))
    }

    fn sort_order(direction: SortDirection) -> i32 {
        match direction {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

/// Validator document requiring every field with its BSON type
pub fn producto_schema() -> Document {
    let mut properties = Document::new();
    for campo in CAMPOS_TEXTO {
        properties.insert(campo, doc! { "bsonType": "string" });
    }
    for campo in CAMPOS_NUMERICOS {
        properties.insert(campo, doc! { "bsonType": "number" });
    }

    doc! {
        "$jsonSchema": {
            "bsonType": "object",
            "required": CAMPOS_OBLIGATORIOS.to_vec(),
            "properties": properties,
        }
    }
}

fn coll_mod_command(collection: &str) -> Document {
    doc! {
        "collMod": collection,
        "validator": producto_schema(),
        "validationLevel": "moderate",
    }
}

/// Per-field messages when `err` is a document validation failure.
pub(crate) fn schema_rejection(err: &mongodb::error::Error) -> Option<Vec<String>> {
    let ErrorKind::Write(WriteFailure::WriteError(write_error)) = err.kind.as_ref() else {
        return None;
    };
    if write_error.code != DOCUMENT_VALIDATION_FAILURE {
        return None;
    }

    let messages = write_error
        .details
        .as_ref()
        .map(schema_violation_messages)
        .unwrap_or_default();

    if messages.is_empty() {
        Some(vec![write_error.message.clone()])
    } else {
        Some(messages)
    }
}

/// Decode the server's `errInfo` into one message per rejected field.
fn schema_violation_messages(err_info: &Document) -> Vec<String> {
    let rules = err_info
        .get_document("details")
        .and_then(|details| details.get_array("schemaRulesNotSatisfied"))
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut messages = Vec::new();
    for rule in rules.iter().filter_map(Bson::as_document) {
        match rule.get_str("operatorName").unwrap_or_default() {
            "required" => {
                let missing = rule
                    .get_array("missingProperties")
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                messages.extend(missing.iter().filter_map(Bson::as_str).map(campo_obligatorio));
            }
            "properties" => {
                let unsatisfied = rule
                    .get_array("propertiesNotSatisfied")
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                for property in unsatisfied.iter().filter_map(Bson::as_document) {
                    let name = property.get_str("propertyName").unwrap_or("?");
                    let reasons: Vec<&str> = property
                        .get_array("details")
                        .map(Vec::as_slice)
                        .unwrap_or_default()
                        .iter()
                        .filter_map(Bson::as_document)
                        .filter_map(|detail| detail.get_str("reason").ok())
                        .collect();
                    if reasons.is_empty() {
                        messages.push(format!("{name}: no cumple el esquema"));
                    } else {
                        messages.push(format!("{name}: {}", reasons.join(", ")));
                    }
                }
            }
            "" => {}
            other => messages.push(format!("Regla {other} no satisfecha")),
        }
    }
    messages
}

#[async_trait]
impl ProductoRepository for MongoProductoRepository {
    #[instrument(skip(self))]
    async fn find(&self, query: ListQuery) -> ProductoResult<Vec<Producto>> {
        let options = FindOptions::builder()
            .sort(
                query
                    .sort_by_id
                    .map(|direction| doc! { "_id": Self::sort_order(direction) }),
            )
            .limit(query.limit.map(i64::from))
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let documents: Vec<ProductoDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Producto::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> ProductoResult<Option<Producto>> {
        let oid = Self::object_id(id)?;
        let found = self.collection.find_one(doc! { "_id": oid }).await?;
        Ok(found.map(Producto::from))
    }

    #[instrument(skip(self, producto), fields(nombre_producto = %producto.nombre_producto))]
    async fn insert(&self, producto: NuevoProducto) -> ProductoResult<Producto> {
        let result = self
            .collection
            .clone_with_type::<NuevoProducto>()
            .insert_one(&producto)
            .await?;

        let oid = result.inserted_id.as_object_id().ok_or_else(|| {
            ProductoError::Decode(format!("unexpected _id type: {}", result.inserted_id))
        })?;

        tracing::info!(producto_id = %oid, "Producto created successfully");
        Ok(producto.with_id(oid.to_hex()))
    }

    #[instrument(skip(self, patch))]
    async fn update_by_id(
        &self,
        id: &str,
        patch: ActualizarProducto,
    ) -> ProductoResult<Option<Producto>> {
        let oid = Self::object_id(id)?;

        // An empty $set is rejected by the server.
        if patch.is_empty() {
            let found = self.collection.find_one(doc! { "_id": oid }).await?;
            return Ok(found.map(Producto::from));
        }

        let set = to_document(&patch).map_err(|e| ProductoError::Decode(e.to_string()))?;
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(producto_id = %id, "Producto updated successfully");
        }
        Ok(updated.map(Producto::from))
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: &str) -> ProductoResult<bool> {
        let oid = Self::object_id(id)?;
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;

        if result.deleted_count > 0 {
            tracing::info!(producto_id = %id, "Producto deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> ProductoResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
