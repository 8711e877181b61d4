//! OpenAPI documentation configuration

use axum_helpers::ErrorResponse;
use utoipa::openapi::OpenApi as OpenApiDoc;
use utoipa::{Modify, OpenApi};

/// Combined OpenAPI documentation for the catalog service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catálogo API",
        version = "0.1.0",
        description = "MongoDB-backed REST API for the product catalog",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    components(schemas(ErrorResponse)),
    modifiers(&DomainApis),
    tags(
        (name = "Productos", description = "Product catalog endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Domain routes are mounted at the root, so their documents are merged
/// rather than nested under a prefix.
struct DomainApis;

impl Modify for DomainApis {
    fn modify(&self, openapi: &mut OpenApiDoc) {
        openapi.merge(domain_productos::ApiDoc::openapi());
    }
}
