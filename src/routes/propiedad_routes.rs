use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use crate::controllers::propiedad_controller::{
    PropiedadController, ERROR_ACTUALIZAR, ERROR_ELIMINAR, ERROR_OBTENER,
};
use crate::dto::propiedad_dto::{CreatedResponse, MessageResponse};
use crate::models::{Propiedad, PropiedadRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{CuerpoJson, PropiedadId};

pub fn create_propiedad_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_propiedades).post(create_propiedad))
        .route(
            "/:id",
            get(get_propiedad).put(update_propiedad).delete(delete_propiedad),
        )
}

async fn list_propiedades(
    State(state): State<AppState>,
) -> Result<Json<Vec<Propiedad>>, AppError> {
    let controller = PropiedadController::new(state.repository.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_propiedad(
    State(state): State<AppState>,
    id: Result<PropiedadId, AppError>,
) -> Result<Json<Propiedad>, AppError> {
    let PropiedadId(id) = id.map_err(|e| e.during(ERROR_OBTENER))?;
    let controller = PropiedadController::new(state.repository.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_propiedad(
    State(state): State<AppState>,
    CuerpoJson(request): CuerpoJson<PropiedadRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let controller = PropiedadController::new(state.repository.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_propiedad(
    State(state): State<AppState>,
    id: Result<PropiedadId, AppError>,
    CuerpoJson(request): CuerpoJson<PropiedadRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let PropiedadId(id) = id.map_err(|e| e.during(ERROR_ACTUALIZAR))?;
    let controller = PropiedadController::new(state.repository.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_propiedad(
    State(state): State<AppState>,
    id: Result<PropiedadId, AppError>,
) -> Result<Json<MessageResponse>, AppError> {
    let PropiedadId(id) = id.map_err(|e| e.during(ERROR_ELIMINAR))?;
    let controller = PropiedadController::new(state.repository.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
