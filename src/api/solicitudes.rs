use crate::api::envelope::decodificar_lista;
use crate::api::ApiService;
use crate::error::ApiError;
use crate::models::{Accion, ResultadoApi, Solicitud, TipoSolicitud};

impl ApiService {
    /// `GET /turnos/solicitudes-reprogramacion` or `/turnos/solicitudes-cancelacion`.
    pub async fn listar_solicitudes(&self, tipo: TipoSolicitud) -> Result<Vec<Solicitud>, ApiError> {
        let body = self.obtener(self.get(tipo.ruta())).await?;
        let solicitudes: Vec<Solicitud> = decodificar_lista(body, tipo.clave_lista())?;
        log::debug!("{} solicitudes de {} cargadas", solicitudes.len(), tipo);
        Ok(solicitudes)
    }

    /// `PATCH /turnos/solicitudes-{tipo}/{id}/aceptar|rechazar`.
    pub async fn transicionar_solicitud(
        &self,
        tipo: TipoSolicitud,
        id: i64,
        accion: Accion,
    ) -> ResultadoApi {
        if accion == Accion::Cancelar {
            return ResultadoApi::fallo("Las solicitudes solo pueden aceptarse o rechazarse");
        }
        log::info!("Solicitud de {} {}: {}", tipo, id, accion);
        let ruta = format!("{}/{}/{}", tipo.ruta(), id, accion.ruta());
        self.enviar(self.patch(&ruta)).await
    }

    pub async fn aceptar_solicitud(&self, tipo: TipoSolicitud, id: i64) -> ResultadoApi {
        self.transicionar_solicitud(tipo, id, Accion::Aceptar).await
    }

    pub async fn rechazar_solicitud(&self, tipo: TipoSolicitud, id: i64) -> ResultadoApi {
        self.transicionar_solicitud(tipo, id, Accion::Rechazar).await
    }
}
