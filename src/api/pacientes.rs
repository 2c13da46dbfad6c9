use crate::api::envelope::decodificar_lista;
use crate::api::ApiService;
use crate::error::ApiError;
use crate::models::api::BusquedaParams;
use crate::models::Paciente;

impl ApiService {
    pub async fn listar_pacientes(&self) -> Result<Vec<Paciente>, ApiError> {
        let body = self.obtener(self.get("pacientes")).await?;
        decodificar_lista(body, "pacientes")
    }

    /// `GET /pacientes/buscar?busqueda=`. An empty term lists everyone.
    pub async fn buscar_pacientes(&self, busqueda: &str) -> Result<Vec<Paciente>, ApiError> {
        let busqueda = busqueda.trim();
        if busqueda.is_empty() {
            return self.listar_pacientes().await;
        }
        let params = BusquedaParams {
            busqueda: busqueda.to_string(),
        };
        let body = self
            .obtener(self.get("pacientes/buscar").query(&params))
            .await?;
        decodificar_lista(body, "pacientes")
    }
}
