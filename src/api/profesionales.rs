use crate::api::envelope::decodificar_lista;
use crate::api::ApiService;
use crate::error::ApiError;
use crate::models::{Doctor, Especialidad, Horario, NuevoProfesional, ResultadoApi};

impl ApiService {
    pub async fn listar_profesionales(&self) -> Result<Vec<Doctor>, ApiError> {
        let body = self.obtener(self.get("profesionales/")).await?;
        decodificar_lista(body, "profesionales")
    }

    pub async fn listar_especialidades(&self) -> Result<Vec<Especialidad>, ApiError> {
        let body = self.obtener(self.get("profesionales/especialidades")).await?;
        decodificar_lista(body, "especialidades")
    }

    pub async fn doctores_por_especialidad(
        &self,
        especialidad_id: i64,
    ) -> Result<Vec<Doctor>, ApiError> {
        let ruta = format!("profesionales/especialidades/{}/doctores", especialidad_id);
        let body = self.obtener(self.get(&ruta)).await?;
        decodificar_lista(body, "doctores")
    }

    pub async fn horarios_profesional(&self, doctor_id: i64) -> Result<Vec<Horario>, ApiError> {
        let ruta = format!("profesionales/{}/horarios", doctor_id);
        let body = self.obtener(self.get(&ruta)).await?;
        decodificar_lista(body, "horarios")
    }

    /// `POST /profesionales/`. Obviously broken input is rejected locally with
    /// the same shape a 422 would have.
    pub async fn crear_profesional(&self, nuevo: &NuevoProfesional) -> ResultadoApi {
        if let Err(errores) = nuevo.validar() {
            log::warn!("Profesional rechazado antes de enviar: {:?}", errores.keys());
            return ResultadoApi::validacion(errores);
        }
        self.enviar(self.post("profesionales/").json(nuevo)).await
    }
}
