use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::ErrorResponse;
use axum_helpers::errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse};
use serde_json::{Map, Value};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductoResult;
use crate::models::{
    ActualizarProducto, ListadoParams, MensajeRespuesta, NuevoProducto, Producto,
};
use crate::repository::ProductoRepository;
use crate::service::ProductoService;

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_productos,
        create_producto,
        get_producto,
        update_producto,
        delete_producto,
        list_primeros,
        list_ultimos,
    ),
    components(
        schemas(Producto, NuevoProducto, ActualizarProducto, MensajeRespuesta, ErrorResponse),
        responses(BadRequestValidationResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Productos", description = "Product catalog endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Catalog routes, mounted at the root of the service
pub fn router<R: ProductoRepository + 'static>(service: ProductoService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/producto", get(list_productos).post(create_producto))
        .route(
            "/producto/{id}",
            get(get_producto).put(update_producto).delete(delete_producto),
        )
        .route("/productos/primeros", get(list_primeros))
        .route("/productos/ultimos", get(list_ultimos))
        .with_state(shared_service)
}

/// Body of a create or update request.
///
/// A request without a JSON content type is read as an empty object.
fn cuerpo(payload: Result<Json<Value>, JsonRejection>) -> ProductoResult<Value> {
    match payload {
        Ok(Json(data)) => Ok(data),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(Value::Object(Map::new())),
        Err(rejection) => Err(rejection.into()),
    }
}

/// List every product
#[utoipa::path(
    get,
    path = "/producto",
    tag = "Productos",
    responses(
        (status = 200, description = "All products", body = Vec<Producto>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_productos<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
) -> ProductoResult<Json<Vec<Producto>>> {
    let productos = service.list().await?;
    Ok(Json(productos))
}

/// Create a product
///
/// All seven fields are required and type-checked; unknown fields are dropped.
#[utoipa::path(
    post,
    path = "/producto",
    tag = "Productos",
    request_body = NuevoProducto,
    responses(
        (status = 201, description = "Product created", body = Producto),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_producto<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ProductoResult<impl IntoResponse> {
    let producto = service.create(cuerpo(payload)?).await?;
    Ok((StatusCode::CREATED, Json(producto)))
}

/// Get a product by identifier
///
/// Responds with `null` when no product has this identifier.
#[utoipa::path(
    get,
    path = "/producto/{id}",
    tag = "Productos",
    params(
        ("id" = String, Path, description = "Product identifier (24-char hex)")
    ),
    responses(
        (status = 200, description = "The product, or null", body = Producto),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_producto<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
    Path(id): Path<String>,
) -> ProductoResult<Json<Option<Producto>>> {
    let producto = service.get_by_id(&id).await?;
    Ok(Json(producto))
}

/// Update a product
///
/// Fields absent from the body are left unchanged. Responds with `null`
/// when no product has this identifier.
#[utoipa::path(
    put,
    path = "/producto/{id}",
    tag = "Productos",
    params(
        ("id" = String, Path, description = "Product identifier (24-char hex)")
    ),
    request_body = ActualizarProducto,
    responses(
        (status = 200, description = "The updated product, or null", body = Producto),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_producto<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ProductoResult<Json<Option<Producto>>> {
    let producto = service.update(&id, cuerpo(payload)?).await?;
    Ok(Json(producto))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/producto/{id}",
    tag = "Productos",
    params(
        ("id" = String, Path, description = "Product identifier (24-char hex)")
    ),
    responses(
        (status = 200, description = "Deleted, or nothing to delete", body = MensajeRespuesta),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_producto<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
    Path(id): Path<String>,
) -> ProductoResult<Json<MensajeRespuesta>> {
    service.delete(&id).await?;
    Ok(Json(MensajeRespuesta::new("Producto eliminado")))
}

/// Oldest products first
#[utoipa::path(
    get,
    path = "/productos/primeros",
    tag = "Productos",
    params(ListadoParams),
    responses(
        (status = 200, description = "Oldest products first", body = Vec<Producto>),
        (status = 400, description = "Malformed `limite`", body = ErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_primeros<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
    params: Result<Query<ListadoParams>, QueryRejection>,
) -> ProductoResult<Json<Vec<Producto>>> {
    let Query(params) = params?;
    let productos = service.list_first(params.resolved()).await?;
    Ok(Json(productos))
}

/// Most recent products first
#[utoipa::path(
    get,
    path = "/productos/ultimos",
    tag = "Productos",
    params(ListadoParams),
    responses(
        (status = 200, description = "Up to `limite` products, newest first", body = Vec<Producto>),
        (status = 400, description = "Malformed `limite`", body = ErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_ultimos<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
    params: Result<Query<ListadoParams>, QueryRejection>,
) -> ProductoResult<Json<Vec<Producto>>> {
    let Query(params) = params?;
    let productos = service.list_last(params.resolved()).await?;
    Ok(Json(productos))
}
