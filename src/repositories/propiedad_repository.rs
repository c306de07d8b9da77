use async_trait::async_trait;
use tracing::debug;

use crate::database::DatabaseConnection;
use crate::models::{Propiedad, PropiedadRequest};
use crate::utils::errors::AppResult;

/// Acceso a la tabla propiedades: una sentencia por operación
#[async_trait]
pub trait PropiedadRepository: Send + Sync {
    /// Todas las propiedades, en el orden que devuelva la base de datos
    async fn find_all(&self) -> AppResult<Vec<Propiedad>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Propiedad>>;

    /// Insertar y devolver el Id asignado
    async fn create(&self, datos: &PropiedadRequest) -> AppResult<i32>;

    /// Sobrescribir todos los campos. Devuelve las filas afectadas.
    async fn update(&self, id: i32, datos: &PropiedadRequest) -> AppResult<u64>;

    /// Borrado físico. Devuelve las filas afectadas.
    async fn delete(&self, id: i32) -> AppResult<u64>;

    /// Comprobar que el almacenamiento responde
    async fn ping(&self) -> AppResult<()>;
}

pub struct PgPropiedadRepository {
    db: DatabaseConnection,
}

impl PgPropiedadRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PropiedadRepository for PgPropiedadRepository {
    async fn find_all(&self) -> AppResult<Vec<Propiedad>> {
        let mut conn = self.db.acquire().await?;

        let propiedades = sqlx::query_as::<_, Propiedad>("SELECT * FROM propiedades")
            .fetch_all(&mut *conn)
            .await?;

        debug!("📋 {} propiedades leídas", propiedades.len());
        Ok(propiedades)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Propiedad>> {
        let mut conn = self.db.acquire().await?;

        let propiedad = sqlx::query_as::<_, Propiedad>("SELECT * FROM propiedades WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(propiedad)
    }

    async fn create(&self, datos: &PropiedadRequest) -> AppResult<i32> {
        let precio = datos.precio_decimal()?;
        let mut conn = self.db.acquire().await?;

        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO propiedades (titulo, tipo, precio, ubicacion, imagen, descripcion)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&datos.titulo)
        .bind(&datos.tipo)
        .bind(precio)
        .bind(&datos.ubicacion)
        .bind(&datos.imagen)
        .bind(&datos.descripcion)
        .fetch_one(&mut *conn)
        .await?;

        Ok(id)
    }

    async fn update(&self, id: i32, datos: &PropiedadRequest) -> AppResult<u64> {
        let precio = datos.precio_decimal()?;
        let mut conn = self.db.acquire().await?;

        let result = sqlx::query(
            r#"
            UPDATE propiedades
            SET titulo = $1, tipo = $2, precio = $3,
                ubicacion = $4, imagen = $5, descripcion = $6
            WHERE id = $7
            "#,
        )
        .bind(&datos.titulo)
        .bind(&datos.tipo)
        .bind(precio)
        .bind(&datos.ubicacion)
        .bind(&datos.imagen)
        .bind(&datos.descripcion)
        .bind(id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let mut conn = self.db.acquire().await?;

        let result = sqlx::query("DELETE FROM propiedades WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.ping().await
    }
}
