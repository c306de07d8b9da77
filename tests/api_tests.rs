use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use inmobiliaria_api::models::{Propiedad, PropiedadRequest};
use inmobiliaria_api::repositories::PropiedadRepository;
use inmobiliaria_api::utils::errors::{AppError, AppResult};
use inmobiliaria_api::{create_router, AppState};

// Repositorio en memoria con Ids autoincrementales, como un SERIAL
#[derive(Default)]
struct InMemoryRepository {
    rows: Mutex<(i32, BTreeMap<i32, Propiedad>)>,
}

#[async_trait]
impl PropiedadRepository for InMemoryRepository {
    async fn find_all(&self) -> AppResult<Vec<Propiedad>> {
        Ok(self.rows.lock().unwrap().1.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Propiedad>> {
        Ok(self.rows.lock().unwrap().1.get(&id).cloned())
    }

    async fn create(&self, datos: &PropiedadRequest) -> AppResult<i32> {
        let mut guard = self.rows.lock().unwrap();
        let id = guard.0 + 1;
        let row = Propiedad::from_request(id, datos)?;
        guard.0 = id;
        guard.1.insert(id, row);
        Ok(id)
    }

    async fn update(&self, id: i32, datos: &PropiedadRequest) -> AppResult<u64> {
        let mut guard = self.rows.lock().unwrap();
        match guard.1.get_mut(&id) {
            Some(row) => {
                *row = Propiedad::from_request(id, datos)?;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        Ok(self.rows.lock().unwrap().1.remove(&id).map_or(0, |_| 1))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

// Repositorio cuya base de datos nunca responde
struct UnavailableRepository;

#[async_trait]
impl PropiedadRepository for UnavailableRepository {
    async fn find_all(&self) -> AppResult<Vec<Propiedad>> {
        Err(AppError::Connection(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_id(&self, _id: i32) -> AppResult<Option<Propiedad>> {
        Err(AppError::Connection(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _datos: &PropiedadRequest) -> AppResult<i32> {
        Err(AppError::Database(sqlx::Error::Protocol("null value in column".to_string())))
    }

    async fn update(&self, _id: i32, _datos: &PropiedadRequest) -> AppResult<u64> {
        Err(AppError::Connection(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _id: i32) -> AppResult<u64> {
        Err(AppError::Connection(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> AppResult<()> {
        Err(AppError::Connection(sqlx::Error::PoolTimedOut))
    }
}

fn create_test_app() -> Router {
    create_router(AppState::new(Arc::new(InMemoryRepository::default())))
}

fn create_failing_app() -> Router {
    create_router(AppState::new(Arc::new(UnavailableRepository)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn casa_a() -> Value {
    json!({
        "Titulo": "Casa A",
        "Tipo": "Venta",
        "Precio": 100000,
        "Ubicacion": "Centro",
        "Imagen": "a.jpg",
        "Descripcion": "desc"
    })
}

#[tokio::test]
async fn test_create_then_get_returns_same_fields() {
    let app = create_test_app();

    let (status, body) = send(&app, Method::POST, "/api/propiedades", Some(casa_a())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Propiedad creada exitosamente");
    assert_eq!(body["Id"], 1);

    let (status, body) = send(&app, Method::GET, "/api/propiedades/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Id"], 1);
    assert_eq!(body["Titulo"], "Casa A");
    assert_eq!(body["Tipo"], "Venta");
    assert_eq!(body["Precio"].as_f64(), Some(100000.0));
    assert_eq!(body["Ubicacion"], "Centro");
    assert_eq!(body["Imagen"], "a.jpg");
    assert_eq!(body["Descripcion"], "desc");
}

#[tokio::test]
async fn test_get_missing_id_is_404() {
    let app = create_test_app();

    let (status, body) = send(&app, Method::GET, "/api/propiedades/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Propiedad no encontrada" }));
}

#[tokio::test]
async fn test_list_is_always_an_array() {
    let app = create_test_app();

    let (status, body) = send(&app, Method::GET, "/api/propiedades", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    send(&app, Method::POST, "/api/propiedades", Some(casa_a())).await;
    send(&app, Method::POST, "/api/propiedades", Some(json!({ "Titulo": "Casa B" }))).await;

    let (status, body) = send(&app, Method::GET, "/api/propiedades", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_update_overwrites_every_field() {
    let app = create_test_app();
    send(&app, Method::POST, "/api/propiedades", Some(casa_a())).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/propiedades/1",
        Some(json!({ "Titulo": "Casa A reformada", "Precio": 120000.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Propiedad actualizada exitosamente");

    let (_, body) = send(&app, Method::GET, "/api/propiedades/1", None).await;
    assert_eq!(body["Titulo"], "Casa A reformada");
    assert_eq!(body["Precio"].as_f64(), Some(120000.5));
    // Los campos no reenviados quedan en NULL
    assert!(body["Tipo"].is_null());
    assert!(body["Descripcion"].is_null());
}

#[tokio::test]
async fn test_update_missing_id_still_returns_200() {
    let app = create_test_app();

    let (status, body) = send(&app, Method::PUT, "/api/propiedades/99", Some(casa_a())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Propiedad actualizada exitosamente");

    let (status, _) = send(&app, Method::GET, "/api/propiedades/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_removes_row() {
    let app = create_test_app();
    send(&app, Method::POST, "/api/propiedades", Some(casa_a())).await;

    let (status, body) = send(&app, Method::DELETE, "/api/propiedades/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Propiedad eliminada exitosamente");

    let (status, _) = send(&app, Method::GET, "/api/propiedades/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Borrar de nuevo no es un error
    let (status, _) = send(&app, Method::DELETE, "/api/propiedades/1", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_ids_are_assigned_by_storage() {
    let app = create_test_app();

    let mut body = casa_a();
    body["Id"] = json!(500);
    let (_, created) = send(&app, Method::POST, "/api/propiedades", Some(body)).await;
    assert_eq!(created["Id"], 1);

    let (status, _) = send(&app, Method::GET, "/api/propiedades/500", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_without_json_body_inserts_nulls() {
    let app = create_test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/propiedades")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let (_, body) = send(&app, Method::GET, "/api/propiedades/1", None).await;
    assert_eq!(body["Id"], 1);
    assert!(body["Titulo"].is_null());
    assert!(body["Precio"].is_null());
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = create_test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/propiedades")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"Titulo\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unbindable_id_is_500_with_operation_message() {
    let app = create_test_app();

    let cases = [
        (Method::GET, "/api/propiedades/abc", None, "Error al obtener la propiedad"),
        (Method::PUT, "/api/propiedades/abc", Some(casa_a()), "Error al actualizar la propiedad"),
        (Method::DELETE, "/api/propiedades/3000000000", None, "Error al eliminar la propiedad"),
    ];

    for (method, uri, body, message) in cases {
        let (status, response) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(response, json!({ "error": message }));
    }
}

#[tokio::test]
async fn test_scalar_fields_are_stored_as_text() {
    let app = create_test_app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/propiedades",
        Some(json!({ "Titulo": 5, "Precio": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/propiedades/{}", created["Id"]);
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Titulo"], "5");
    assert_eq!(body["Precio"].as_f64(), Some(1.0));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/propiedades",
        Some(json!({ "Titulo": "Casa", "Precio": "100000" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_unparseable_price_is_500_not_400() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/propiedades",
        Some(json!({ "Titulo": "Casa", "Precio": "caro" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Error al crear la propiedad" }));

    let (_, list) = send(&app, Method::GET, "/api/propiedades", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_storage_failures_are_500_with_operation_message() {
    let app = create_failing_app();

    let cases = [
        (Method::GET, "/api/propiedades", None, "Error al obtener propiedades"),
        (Method::GET, "/api/propiedades/1", None, "Error al obtener la propiedad"),
        (Method::POST, "/api/propiedades", Some(casa_a()), "Error al crear la propiedad"),
        (Method::PUT, "/api/propiedades/1", Some(casa_a()), "Error al actualizar la propiedad"),
        (Method::DELETE, "/api/propiedades/1", None, "Error al eliminar la propiedad"),
    ];

    for (method, uri, body, message) in cases {
        let (status, response) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(response, json!({ "error": message }));
    }
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = create_test_app();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/propiedades")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_health_reports_database_state() {
    let (status, body) = send(&create_test_app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    let (status, body) = send(&create_failing_app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["database"], "unavailable");
}
