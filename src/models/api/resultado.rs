use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Uniform outcome of every state-changing backend call.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ResultadoApi {
    pub exito: bool,
    pub mensaje: String,
    #[serde(default)]
    pub detalle: Option<String>,
    #[serde(default)]
    pub errores: Option<HashMap<String, Vec<String>>>,
    #[serde(default)]
    pub datos: Option<Value>,
    #[serde(default)]
    pub estado_http: Option<u16>,
}

impl ResultadoApi {
    pub const MENSAJE_CONEXION: &'static str = "Error de conexión";

    pub fn ok(mensaje: impl Into<String>) -> Self {
        Self {
            exito: true,
            mensaje: mensaje.into(),
            ..Default::default()
        }
    }

    pub fn fallo(mensaje: impl Into<String>) -> Self {
        Self {
            exito: false,
            mensaje: mensaje.into(),
            ..Default::default()
        }
    }

    /// No HTTP response at all: DNS, refused connection, timeout, broken body.
    pub fn error_conexion(detalle: impl Into<String>) -> Self {
        Self {
            exito: false,
            mensaje: Self::MENSAJE_CONEXION.to_string(),
            detalle: Some(detalle.into()),
            ..Default::default()
        }
    }

    /// Client-side validation failure, never sent over the wire.
    pub fn validacion(errores: HashMap<String, Vec<String>>) -> Self {
        Self {
            exito: false,
            mensaje: "Error de validación".to_string(),
            errores: Some(errores),
            ..Default::default()
        }
    }

    pub fn errores_de(&self, campo: &str) -> &[String] {
        self.errores
            .as_ref()
            .and_then(|e| e.get(campo))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Message plus detail, the way the message panel shows it.
    pub fn mensaje_completo(&self) -> String {
        match &self.detalle {
            Some(detalle) if !detalle.is_empty() => format!("{}: {}", self.mensaje, detalle),
            _ => self.mensaje.clone(),
        }
    }
}
