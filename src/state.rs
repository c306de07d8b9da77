//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. No contiene estado mutable: cada solicitud
//! obtiene su propia conexión a través del repositorio.

use std::sync::Arc;

use crate::database::DatabaseConnection;
use crate::repositories::{PgPropiedadRepository, PropiedadRepository};

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn PropiedadRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn PropiedadRepository>) -> Self {
        Self { repository }
    }

    /// Estado respaldado por PostgreSQL
    pub fn with_database(db: DatabaseConnection) -> Self {
        Self::new(Arc::new(PgPropiedadRepository::new(db)))
    }
}
