use serde::{Deserialize, Serialize};
use std::fmt;

/// A state-changing action a user can request on an appointment or a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accion {
    Aceptar,
    Rechazar,
    Cancelar,
}

impl Accion {
    /// Path segment of the backend transition endpoint.
    pub fn ruta(&self) -> &'static str {
        match self {
            Accion::Aceptar => "aceptar",
            Accion::Rechazar => "rechazar",
            Accion::Cancelar => "cancelar",
        }
    }
}

impl fmt::Display for Accion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ruta())
    }
}
