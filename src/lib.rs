//! API REST de propiedades inmobiliarias
//!
//! CRUD sobre la tabla `propiedades` expuesto en `/api/propiedades`.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

pub use config::AppConfig;
pub use routes::create_router;
pub use state::AppState;
