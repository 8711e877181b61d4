use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use strum::Display;
use thiserror::Error;

/// Catalog operation, used to pick the client-facing failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    List,
    Fetch,
    Create,
    Update,
    Delete,
    ListFirst,
    ListLast,
}

impl Operation {
    /// Fixed message returned with a 500 when the store fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Error obteniendo productos",
            Operation::Fetch => "Error obteniendo producto",
            Operation::Create => "Error creando producto.",
            Operation::Update => "Error actualizando producto",
            Operation::Delete => "Error eliminando producto",
            Operation::ListFirst => "Error obteniendo los primeros productos",
            Operation::ListLast => "Error obteniendo los últimos productos",
        }
    }
}

#[derive(Debug, Error)]
pub enum ProductoError {
    /// Presence or type check failed on a create payload
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The collection schema rejected the document, one message per field
    #[error("Document rejected by collection schema: {}", .0.join("; "))]
    StoreValidation(Vec<String>),

    /// Request body was not readable as JSON
    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),

    /// Query string did not match the listing parameters
    #[error("Malformed query string: {0}")]
    MalformedQuery(#[from] QueryRejection),

    /// Identifier is not a well-formed store key
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// Value could not be converted to or from the stored field types
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Database error: {0}")]
    Database(String),

    /// Store failure after conversion at the service boundary
    #[error("{operation} failed: {reason}")]
    Unavailable {
        operation: Operation,
        reason: String,
    },
}

pub type ProductoResult<T> = Result<T, ProductoError>;

impl ProductoError {
    /// Convert store-level failures into `Unavailable` for `operation`.
    ///
    /// Client errors pass through. Schema rejections stay client errors only
    /// for `Create`; on any other operation they are store failures.
    pub fn during(self, operation: Operation) -> Self {
        match self {
            ProductoError::Validation(_)
            | ProductoError::MalformedBody(_)
            | ProductoError::MalformedQuery(_)
            | ProductoError::Unavailable { .. } => self,
            ProductoError::StoreValidation(_) if operation == Operation::Create => self,
            other => ProductoError::Unavailable {
                operation,
                reason: other.to_string(),
            },
        }
    }
}

/// Convert ProductoError to AppError for standardized error responses
impl From<ProductoError> for AppError {
    fn from(err: ProductoError) -> Self {
        match err {
            ProductoError::Validation(msg) => AppError::BadRequest(msg),
            ProductoError::StoreValidation(messages) => AppError::ValidationMessages(messages),
            ProductoError::MalformedBody(rejection) => AppError::JsonExtractorRejection(rejection),
            ProductoError::MalformedQuery(rejection) => {
                AppError::QueryExtractorRejection(rejection)
            }
            ProductoError::Unavailable { operation, reason } => {
                tracing::error!(%operation, %reason, "Store operation failed");
                AppError::InternalServerError(operation.failure_message().to_string())
            }
            other @ (ProductoError::InvalidId(_)
            | ProductoError::Decode(_)
            | ProductoError::Database(_)) => {
                tracing::error!(error = %other, "Unconverted store error reached the HTTP layer");
                AppError::InternalServerError(
                    ErrorCode::InternalError.default_message().to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ProductoError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductoError {
    fn from(err: mongodb::error::Error) -> Self {
        match crate::mongodb::schema_rejection(&err) {
            Some(messages) => ProductoError::StoreValidation(messages),
            None => ProductoError::Database(err.to_string()),
        }
    }
}
