use thiserror::Error;

/// Failures surfaced by read calls against the backend. Mutating calls never
/// return these; they fold them into a `ResultadoApi`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Error de conexión: {0}")]
    Transporte(#[from] reqwest::Error),

    #[error("Respuesta inválida del servidor: {0}")]
    Decodificacion(String),

    #[error("HTTP {estado}: {mensaje}")]
    Http { estado: u16, mensaje: String },

    #[error("URL inválida: {0}")]
    Url(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decodificacion(err.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("transición inválida: no se puede {accion} en estado {estado}")]
pub struct TransicionInvalida {
    pub estado: String,
    pub accion: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("variable {variable} inválida: {valor}")]
    Invalida { variable: &'static str, valor: String },

    #[error("URL base inválida: {0}")]
    UrlBase(String),
}
