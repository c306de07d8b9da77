//! Configuración de conexión a PostgreSQL
//!
//! Este módulo produce una conexión utilizable por cada solicitud.
//! El pool se crea de forma perezosa: arrancar el servidor no requiere
//! que la base de datos esté disponible.

use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Postgres;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::utils::errors::{AppError, AppResult};

/// Proveedor de conexiones a la base de datos
#[derive(Clone, Debug)]
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Crear el proveedor a partir de la configuración estática
    pub fn new(config: &DatabaseConfig) -> Self {
        info!("🗄️  Base de datos configurada: {}", config.masked());

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy_with(config.connect_options());

        Self { pool }
    }

    /// Obtener una conexión para la solicitud en curso.
    ///
    /// Un único intento: si falla, el error llega directamente al llamador.
    pub async fn acquire(&self) -> AppResult<PoolConnection<Postgres>> {
        debug!("Obteniendo conexión a la base de datos");
        self.pool.acquire().await.map_err(AppError::Connection)
    }

    /// Verificar que la base de datos responde
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }
}
