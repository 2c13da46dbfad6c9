use crate::models::ResultadoApi;
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const MENSAJE_EXITO: &str = "Operación realizada correctamente";
pub const MENSAJE_NO_ENCONTRADO: &str = "Recurso no encontrado";
pub const MENSAJE_DATOS_INVALIDOS: &str = "Datos inválidos";
pub const MENSAJE_VALIDACION: &str = "Error de validación";
pub const MENSAJE_ERROR_SERVIDOR: &str = "Error interno del servidor";
pub const MENSAJE_FALLO: &str = "La operación no pudo completarse";

/// Turns an HTTP status and raw body into a `ResultadoApi`.
///
/// The body may be empty, non-JSON or any of the backend's envelopes; whatever
/// message, detail and field errors it carries win over the defaults.
pub fn clasificar(estado: u16, cuerpo: &str) -> ResultadoApi {
    let body: Value = serde_json::from_str(cuerpo).unwrap_or(Value::Null);
    let obj = body.as_object();

    let mensaje_backend = obj.and_then(|o| texto(o, &["mensaje", "message"]));
    let detalle = obj.and_then(|o| texto(o, &["detalle", "error"]));

    let (exito, defecto) = match estado {
        200..=299 => (true, MENSAJE_EXITO),
        404 => (false, MENSAJE_NO_ENCONTRADO),
        400 => (false, MENSAJE_DATOS_INVALIDOS),
        422 => (false, MENSAJE_VALIDACION),
        500 => (false, MENSAJE_ERROR_SERVIDOR),
        _ => (false, MENSAJE_FALLO),
    };

    let errores = if estado == 422 {
        obj.and_then(errores_por_campo)
    } else {
        None
    };

    let datos = if exito && !body.is_null() {
        Some(obj.and_then(|o| o.get("data").cloned()).unwrap_or(body.clone()))
    } else {
        None
    };

    ResultadoApi {
        exito,
        mensaje: mensaje_backend.unwrap_or_else(|| defecto.to_string()),
        detalle,
        errores,
        datos,
        estado_http: Some(estado),
    }
}

/// First non-empty value among `claves`, strings verbatim and anything else as JSON.
fn texto(obj: &Map<String, Value>, claves: &[&str]) -> Option<String> {
    claves.iter().find_map(|clave| match obj.get(*clave) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Null) | Some(Value::String(_)) | None => None,
        Some(other) => Some(other.to_string()),
    })
}

/// `errores` (or Laravel's default `errors`) as field → messages. Single strings
/// are promoted to one-element lists.
fn errores_por_campo(obj: &Map<String, Value>) -> Option<HashMap<String, Vec<String>>> {
    let raw = obj
        .get("errores")
        .or_else(|| obj.get("errors"))?
        .as_object()?;

    let errores = raw
        .iter()
        .map(|(campo, valor)| {
            let mensajes = match valor {
                Value::Array(items) => items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
                Value::String(s) => vec![s.clone()],
                other => vec![other.to_string()],
            };
            (campo.clone(), mensajes)
        })
        .collect();
    Some(errores)
}
