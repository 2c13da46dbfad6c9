use crate::api::envelope::decodificar_lista;
use crate::api::ApiService;
use crate::error::ApiError;
use crate::models::api::DisponiblesParams;
use crate::models::{Accion, NuevoTurno, Reprogramacion, ResultadoApi, Turno, TurnoFiltro};
use crate::utils::parse_hora;
use chrono::{NaiveDate, NaiveTime};

impl ApiService {
    /// `GET /turnos` with the optional filters.
    pub async fn listar_turnos(&self, filtro: &TurnoFiltro) -> Result<Vec<Turno>, ApiError> {
        let body = self.obtener(self.get("turnos").query(filtro)).await?;
        let turnos: Vec<Turno> = decodificar_lista(body, "turnos")?;
        log::debug!("{} turnos cargados", turnos.len());
        Ok(turnos)
    }

    /// `PATCH /turnos/{id}/aceptar|rechazar|cancelar`.
    pub async fn transicionar_turno(&self, id: i64, accion: Accion) -> ResultadoApi {
        log::info!("Turno {}: {}", id, accion);
        let ruta = format!("turnos/{}/{}", id, accion.ruta());
        self.enviar(self.patch(&ruta)).await
    }

    pub async fn aceptar_turno(&self, id: i64) -> ResultadoApi {
        self.transicionar_turno(id, Accion::Aceptar).await
    }

    pub async fn rechazar_turno(&self, id: i64) -> ResultadoApi {
        self.transicionar_turno(id, Accion::Rechazar).await
    }

    pub async fn cancelar_turno(&self, id: i64) -> ResultadoApi {
        self.transicionar_turno(id, Accion::Cancelar).await
    }

    /// `PATCH /turnos/{id}/reprogramar` with `{fecha, hora}`. A 422 keeps the
    /// per-field messages in `errores`.
    pub async fn reprogramar_turno(&self, id: i64, nueva: &Reprogramacion) -> ResultadoApi {
        log::info!("Turno {}: reprogramar a {} {}", id, nueva.fecha, nueva.hora);
        let ruta = format!("turnos/{}/reprogramar", id);
        self.enviar(self.patch(&ruta).json(nueva)).await
    }

    /// `POST /turnos/store?paciente_id&doctor_id&fecha&hora`.
    pub async fn crear_turno(&self, turno: &NuevoTurno) -> ResultadoApi {
        log::info!(
            "Nuevo turno paciente={} doctor={} {} {}",
            turno.paciente_id,
            turno.doctor_id,
            turno.fecha,
            turno.hora
        );
        self.enviar(self.post("turnos/store").query(turno)).await
    }

    /// `GET /turnos/disponibles?doctor_id&fecha`, free slots for that day.
    pub async fn turnos_disponibles(
        &self,
        doctor_id: i64,
        fecha: NaiveDate,
    ) -> Result<Vec<NaiveTime>, ApiError> {
        let params = DisponiblesParams { doctor_id, fecha };
        let body = self
            .obtener(self.get("turnos/disponibles").query(&params))
            .await?;
        let crudos: Vec<String> = decodificar_lista(body, "disponibles")?;
        crudos
            .iter()
            .map(|raw| {
                parse_hora(raw)
                    .ok_or_else(|| ApiError::Decodificacion(format!("hora inválida: {raw}")))
            })
            .collect()
    }
}
