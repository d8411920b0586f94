use analytics::AnalyticsError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_types::FormulaError;
use datasets::DatasetError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Formula error: {0}")]
    Formula(#[from] FormulaError),
    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Requests that are incomplete or malformed are 400. Requests that are well
/// formed but ask for something the mathematics does not allow are 422.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Formula(FormulaError::MissingInput { .. } | FormulaError::UnknownLabel { .. }) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Formula(_) | AppError::Analytics(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Dataset(DatasetError::Io(_)) => {
                tracing::error!(error = ?self, "Dataset I/O error.");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Dataset(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        if status != StatusCode::INTERNAL_SERVER_ERROR {
            tracing::debug!(%status, error = %self, "Request rejected");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
