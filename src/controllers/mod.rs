pub mod propiedad_controller;
