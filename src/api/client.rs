use crate::api::clasificacion::clasificar;
use crate::error::ApiError;
use crate::models::{Config, ResultadoApi};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

/// Stateless HTTP client for the SaludTotal backend.
///
/// Read calls return `Result<_, ApiError>`. Mutating calls always return a
/// `ResultadoApi`, including when the server could not be reached.
#[derive(Clone, Debug)]
pub struct ApiService {
    client: Client,
    base_url: String,
}

impl ApiService {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Self::with_client(client, base_url)
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_client(builder.build()?, config.api_url.clone())
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if reqwest::Url::parse(&base_url).is_err() {
            return Err(ApiError::Url(base_url));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, ruta: &str) -> String {
        format!("{}/{}", self.base_url, ruta.trim_start_matches('/'))
    }

    pub(crate) fn get(&self, ruta: &str) -> RequestBuilder {
        self.client.get(self.url(ruta))
    }

    pub(crate) fn patch(&self, ruta: &str) -> RequestBuilder {
        self.client.patch(self.url(ruta))
    }

    pub(crate) fn post(&self, ruta: &str) -> RequestBuilder {
        self.client.post(self.url(ruta))
    }

    /// Sends a read request and parses the JSON body. Non-2xx answers become
    /// `ApiError::Http` carrying the backend message when there is one.
    pub(crate) async fn obtener(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request
            .header("Accept", "application/json")
            .send()
            .await?;
        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            let resultado = clasificar(status.as_u16(), &raw);
            log::warn!("GET falló con HTTP {}: {}", status.as_u16(), resultado.mensaje);
            return Err(ApiError::Http {
                estado: status.as_u16(),
                mensaje: resultado.mensaje,
            });
        }

        serde_json::from_str(&raw).map_err(|e| {
            log::error!("Respuesta no es JSON válido: {}", e);
            ApiError::from(e)
        })
    }

    /// Sends a mutating request. Never fails: transport errors turn into a
    /// `ResultadoApi` with the connection-error message.
    pub(crate) async fn enviar(&self, request: RequestBuilder) -> ResultadoApi {
        let response = match request.header("Accept", "application/json").send().await {
            Ok(response) => response,
            Err(e) => {
                log::error!("Error de conexión: {}", e);
                return ResultadoApi::error_conexion(e.to_string());
            }
        };

        let status = response.status().as_u16();
        let raw = match response.text().await {
            Ok(raw) => raw,
            Err(e) => {
                log::error!("No se pudo leer la respuesta (HTTP {}): {}", status, e);
                return ResultadoApi::error_conexion(e.to_string());
            }
        };

        let resultado = clasificar(status, &raw);
        if resultado.exito {
            log::info!("HTTP {}: {}", status, resultado.mensaje);
        } else {
            log::warn!("HTTP {}: {}", status, resultado.mensaje_completo());
        }
        resultado
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_without_double_slashes() {
        let api = ApiService::new("http://localhost:8000/api/").unwrap();
        assert_eq!(api.url("/turnos"), "http://localhost:8000/api/turnos");
        assert_eq!(api.url("profesionales/"), "http://localhost:8000/api/profesionales/");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(matches!(ApiService::new("not a url"), Err(ApiError::Url(_))));
    }
}
