//! Middleware de CORS
//!
//! Este módulo maneja la configuración de CORS para permitir
//! requests desde cualquier origen.

use tower_http::cors::CorsLayer;

/// Crear middleware de CORS permisivo: cualquier origen, método y cabecera
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}
