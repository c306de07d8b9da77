use serde::{Deserialize, Serialize};

/// Response con mensaje de confirmación
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

/// Response de creación: incluye el Id asignado por la base de datos
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CreatedResponse {
    pub message: String,
    #[serde(rename = "Id")]
    pub id: i32,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
