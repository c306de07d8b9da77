//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de base de datos y del servidor.
//! Se lee una sola vez al arrancar y se pasa explícitamente a quien la necesita.

pub mod database;
pub mod environment;

pub use database::DatabaseConfig;
pub use environment::EnvironmentConfig;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Errores al leer la configuración
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Valor inválido para {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Configuración completa de la aplicación
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub server: EnvironmentConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: EnvironmentConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}
