use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Product not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Insufficient stock")]
    InsufficientStock,

    #[error("{context}")]
    Storage {
        context: &'static str,
        #[source]
        source: sea_orm::DbErr,
    },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::InsufficientStock => StatusCode::BAD_REQUEST,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Tag a store fault with the operation that hit it, for use with `map_err`.
pub fn storage(context: &'static str) -> impl FnOnce(sea_orm::DbErr) -> AppError {
    move |source| AppError::Storage { context, source }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match &self {
            AppError::Storage { source, .. } => {
                tracing::error!(error = %source, "{}", self);
                Some(source.to_string())
            }
            _ => None,
        };

        let body = ApiResponse::failure(self.to_string(), error);
        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
