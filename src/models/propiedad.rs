//! Modelo de Propiedad
//!
//! Mapea la tabla `propiedades`. En JSON los campos usan los nombres de
//! columna en PascalCase (`Id`, `Titulo`, `Precio`, ...).

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use std::str::FromStr;

use crate::utils::errors::{AppError, AppResult};

/// Propiedad inmobiliaria - una fila de la tabla propiedades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct Propiedad {
    pub id: i32,
    pub titulo: Option<String>,
    pub tipo: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub precio: Option<Decimal>,
    pub ubicacion: Option<String>,
    pub imagen: Option<String>,
    pub descripcion: Option<String>,
}

/// Campos de una propiedad enviados por el cliente (crear y actualizar).
///
/// No hay validación: un campo ausente se guarda como NULL y un escalar de otro
/// tipo se convierte a texto. Un `Id` en el cuerpo se ignora, siempre lo asigna
/// la base de datos.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PropiedadRequest {
    #[serde(deserialize_with = "texto_flexible")]
    pub titulo: Option<String>,
    #[serde(deserialize_with = "texto_flexible")]
    pub tipo: Option<String>,
    #[serde(deserialize_with = "precio_flexible")]
    pub precio: Option<Precio>,
    #[serde(deserialize_with = "texto_flexible")]
    pub ubicacion: Option<String>,
    #[serde(deserialize_with = "texto_flexible")]
    pub imagen: Option<String>,
    #[serde(deserialize_with = "texto_flexible")]
    pub descripcion: Option<String>,
}

/// Precio tal como llegó en el cuerpo
#[derive(Debug, Clone, PartialEq)]
pub enum Precio {
    Importe(Decimal),
    /// Valor que no representa un importe; falla al enlazarlo a la sentencia
    Invalido(String),
}

impl From<Decimal> for Precio {
    fn from(importe: Decimal) -> Self {
        Precio::Importe(importe)
    }
}

impl PropiedadRequest {
    /// Precio listo para enlazar como NUMERIC
    pub fn precio_decimal(&self) -> AppResult<Option<Decimal>> {
        match &self.precio {
            None => Ok(None),
            Some(Precio::Importe(importe)) => Ok(Some(*importe)),
            Some(Precio::Invalido(raw)) => Err(AppError::InvalidParameter(format!(
                "Precio '{}' no es un importe",
                raw
            ))),
        }
    }
}

impl Propiedad {
    /// Construir la fila resultante de guardar `datos` con el `id` dado
    pub fn from_request(id: i32, datos: &PropiedadRequest) -> AppResult<Self> {
        Ok(Self {
            id,
            titulo: datos.titulo.clone(),
            tipo: datos.tipo.clone(),
            precio: datos.precio_decimal()?,
            ubicacion: datos.ubicacion.clone(),
            imagen: datos.imagen.clone(),
            descripcion: datos.descripcion.clone(),
        })
    }
}

fn texto_flexible<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(texto)) => Some(texto),
        Some(otro) => Some(otro.to_string()),
    })
}

fn precio_flexible<'de, D>(deserializer: D) -> Result<Option<Precio>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::Number(numero)) => Some(parse_importe(&numero.to_string())),
        Some(Value::String(texto)) => Some(parse_importe(&texto)),
        Some(otro) => Some(Precio::Invalido(otro.to_string())),
    })
}

fn parse_importe(raw: &str) -> Precio {
    let limpio = raw.trim();
    Decimal::from_str(limpio)
        .or_else(|_| Decimal::from_scientific(limpio))
        .map(Precio::Importe)
        .unwrap_or_else(|_| Precio::Invalido(raw.to_string()))
}
