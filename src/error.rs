//! Error types for the catalog server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error page data attached to error responses.
///
/// The `render_error_pages` middleware turns it into the HTML error view; without
/// the middleware the plain text body is sent as is.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub message: String,
    pub details: Option<String>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Template(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn page(&self) -> ErrorPage {
        match self {
            AppError::NotFound(msg) => ErrorPage {
                message: msg.clone(),
                details: None,
            },
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                ErrorPage {
                    message: "Database error".to_string(),
                    details: Some(e.to_string()),
                }
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {:?}", e);
                ErrorPage {
                    message: "Template error".to_string(),
                    details: Some(format!("{:?}", e)),
                }
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorPage {
                    message: "Internal server error".to_string(),
                    details: Some(msg.clone()),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let page = self.page();

        let mut response = (status, page.message.clone()).into_response();
        response.extensions_mut().insert(page);
        response
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
