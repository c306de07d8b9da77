use std::sync::Arc;
use tracing::{info, warn};

use crate::dto::propiedad_dto::{CreatedResponse, MessageResponse};
use crate::models::{Propiedad, PropiedadRequest};
use crate::repositories::PropiedadRepository;
use crate::utils::errors::{AppError, AppResult};

pub const ERROR_LISTAR: &str = "Error al obtener propiedades";
pub const ERROR_OBTENER: &str = "Error al obtener la propiedad";
pub const ERROR_CREAR: &str = "Error al crear la propiedad";
pub const ERROR_ACTUALIZAR: &str = "Error al actualizar la propiedad";
pub const ERROR_ELIMINAR: &str = "Error al eliminar la propiedad";

pub struct PropiedadController {
    repository: Arc<dyn PropiedadRepository>,
}

impl PropiedadController {
    pub fn new(repository: Arc<dyn PropiedadRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Propiedad>> {
        self.repository
            .find_all()
            .await
            .map_err(|e| e.during(ERROR_LISTAR))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Propiedad> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| e.during(ERROR_OBTENER))?
            .ok_or_else(|| AppError::NotFound("Propiedad no encontrada".to_string()))
    }

    pub async fn create(&self, request: PropiedadRequest) -> AppResult<CreatedResponse> {
        let id = self
            .repository
            .create(&request)
            .await
            .map_err(|e| e.during(ERROR_CREAR))?;

        info!("🏠 Propiedad {} creada", id);

        Ok(CreatedResponse {
            message: "Propiedad creada exitosamente".to_string(),
            id,
        })
    }

    // Sin comprobación de existencia: un Id inexistente también responde 200
    pub async fn update(&self, id: i32, request: PropiedadRequest) -> AppResult<MessageResponse> {
        let rows = self
            .repository
            .update(id, &request)
            .await
            .map_err(|e| e.during(ERROR_ACTUALIZAR))?;

        if rows == 0 {
            warn!("⚠️ Actualización sin efecto: la propiedad {} no existe", id);
        } else {
            info!("✏️ Propiedad {} actualizada", id);
        }

        Ok(MessageResponse::new("Propiedad actualizada exitosamente"))
    }

    pub async fn delete(&self, id: i32) -> AppResult<MessageResponse> {
        let rows = self
            .repository
            .delete(id)
            .await
            .map_err(|e| e.during(ERROR_ELIMINAR))?;

        if rows == 0 {
            warn!("⚠️ Eliminación sin efecto: la propiedad {} no existe", id);
        } else {
            info!("🗑️ Propiedad {} eliminada", id);
        }

        Ok(MessageResponse::new("Propiedad eliminada exitosamente"))
    }
}
