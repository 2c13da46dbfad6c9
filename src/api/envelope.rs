use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// The list shapes the backend answers with, tried in declaration order.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Lista(Vec<T>),
    Data { data: Vec<T> },
}

/// Decodes a list from a bare array, `{success, data: [...]}` or
/// `{mensaje, <clave>: [...]}`. Fails only when every shape fails.
pub fn decodificar_lista<T: DeserializeOwned>(body: Value, clave: &str) -> Result<Vec<T>, ApiError> {
    let first_err = match serde_json::from_value::<Envelope<T>>(body.clone()) {
        Ok(Envelope::Lista(items)) | Ok(Envelope::Data { data: items }) => return Ok(items),
        Err(e) => e,
    };

    if let Value::Object(mut map) = body {
        if let Some(inner) = map.remove(clave) {
            return serde_json::from_value(inner).map_err(ApiError::from);
        }
        if map.get("success").and_then(Value::as_bool) == Some(false) {
            let mensaje = map
                .get("mensaje")
                .or_else(|| map.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("respuesta sin datos");
            return Err(ApiError::Decodificacion(mensaje.to_string()));
        }
    }

    Err(ApiError::Decodificacion(format!(
        "formato de respuesta no reconocido: {first_err}"
    )))
}

/// Same as [`decodificar_lista`] for a single entity.
pub fn decodificar_entidad<T: DeserializeOwned>(body: Value, clave: &str) -> Result<T, ApiError> {
    let body = match body {
        Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or_default(),
        Value::Object(mut map) if map.contains_key(clave) => map.remove(clave).unwrap_or_default(),
        other => other,
    };
    serde_json::from_value(body).map_err(ApiError::from)
}
