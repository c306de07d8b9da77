//! Extractores de Axum propios
//!
//! Devuelven el mismo cuerpo de error `{ "error": ... }` que el resto de la API
//! en lugar de los rechazos por defecto de Axum.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use serde::de::DeserializeOwned;

use super::errors::AppError;

/// Id numérico de una propiedad tomado de la ruta.
///
/// Un Id que no cabe en un entero no es un error del cliente: se rechaza como
/// un parámetro que la base de datos no acepta. Los handlers lo extraen como
/// `Result<PropiedadId, AppError>` para asociarlo al mensaje de su operación.
#[derive(Debug, Clone, Copy)]
pub struct PropiedadId(pub i32);

impl PropiedadId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        raw.trim()
            .parse::<i32>()
            .map(Self)
            .map_err(|_| AppError::InvalidParameter(format!("Id de propiedad '{}'", raw)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PropiedadId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidParameter(format!("Id de propiedad: {}", e)))?;

        Self::parse(&id)
    }
}

/// Cuerpo JSON tolerante.
///
/// Sin `Content-Type` JSON o con cuerpo vacío se comporta como `{}`, de modo
/// que todos los campos quedan ausentes. Sólo el JSON mal formado se rechaza.
#[derive(Debug, Clone)]
pub struct CuerpoJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for CuerpoJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::BadRequest("Cuerpo de la solicitud ilegible".to_string()))?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|_| AppError::BadRequest("Cuerpo JSON inválido".to_string()))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let mime = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}
