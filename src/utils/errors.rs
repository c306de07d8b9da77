//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Parámetro que no se puede enlazar a la sentencia SQL
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{message}: {source}")]
    Operation {
        message: &'static str,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    /// Asociar un fallo de almacenamiento al mensaje de la operación en curso
    pub fn during(self, message: &'static str) -> Self {
        match self {
            err @ (AppError::NotFound(_) | AppError::BadRequest(_) | AppError::Operation { .. }) => {
                err
            }
            other => AppError::Operation {
                message,
                source: Box::new(other),
            },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Connection(_)
            | AppError::Database(_)
            | AppError::InvalidParameter(_)
            | AppError::Operation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = match self {
            AppError::Operation { message, source } => {
                tracing::error!(error = %source, "❌ {}", message);
                message.to_string()
            }
            AppError::Connection(e) => {
                tracing::error!(error = %e, "❌ Error al conectar a la base de datos");
                "Error interno del servidor".to_string()
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "❌ Error de base de datos");
                "Error interno del servidor".to_string()
            }
            AppError::InvalidParameter(msg) => {
                tracing::error!("❌ Parámetro inválido: {}", msg);
                "Error interno del servidor".to_string()
            }
            AppError::NotFound(msg) => {
                tracing::debug!("Recurso no encontrado: {}", msg);
                msg
            }
            AppError::BadRequest(msg) => {
                tracing::debug!("Solicitud incorrecta: {}", msg);
                msg
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;
