use crate::api::envelope::{decodificar_entidad, decodificar_lista};
use crate::api::ApiService;
use crate::error::ApiError;
use crate::models::{EstadisticasDoctor, EstadisticasGlobales, RangoFechas};

impl ApiService {
    pub async fn estadisticas_doctor(
        &self,
        doctor_id: i64,
        rango: &RangoFechas,
    ) -> Result<EstadisticasDoctor, ApiError> {
        let ruta = format!("estadisticas/doctor/{}", doctor_id);
        let body = self.obtener(self.get(&ruta).query(rango)).await?;
        let mut stats: EstadisticasDoctor = decodificar_entidad(body, "estadisticas")?;
        stats.doctor_id.get_or_insert(doctor_id);
        Ok(stats)
    }

    pub async fn estadisticas_globales(
        &self,
        rango: &RangoFechas,
    ) -> Result<EstadisticasGlobales, ApiError> {
        let body = self
            .obtener(self.get("estadisticas/globales").query(rango))
            .await?;
        decodificar_entidad(body, "estadisticas")
    }

    pub async fn estadisticas_doctores(
        &self,
        rango: &RangoFechas,
    ) -> Result<Vec<EstadisticasDoctor>, ApiError> {
        let body = self
            .obtener(self.get("estadisticas/doctores").query(rango))
            .await?;
        decodificar_lista(body, "estadisticas")
    }
}
