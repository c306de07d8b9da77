pub mod propiedad_dto;
