//! Utilidades del sistema
//!
//! Este módulo contiene el manejo de errores y los extractores propios.

pub mod errors;
pub mod extractors;
