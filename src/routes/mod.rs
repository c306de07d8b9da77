pub mod health_routes;
pub mod propiedad_routes;

use axum::Router;

use crate::middleware::{cors_middleware, trace_middleware};
use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/propiedades", propiedad_routes::create_propiedad_router())
        .merge(health_routes::create_health_router())
        .layer(cors_middleware())
        .layer(trace_middleware())
        .with_state(state)
}
