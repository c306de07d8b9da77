//! Middleware del sistema
//!
//! Capas aplicadas a todas las rutas: CORS y trazas de las solicitudes HTTP.

pub mod cors;

pub use cors::*;

use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::TraceLayer;

/// Trazas de cada solicitud HTTP (método, ruta, estado y latencia)
pub fn trace_middleware() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}
