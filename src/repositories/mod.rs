pub mod propiedad_repository;

pub use propiedad_repository::{PgPropiedadRepository, PropiedadRepository};
