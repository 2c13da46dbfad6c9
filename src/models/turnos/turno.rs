use crate::error::TransicionInvalida;
use crate::models::accion::Accion;
use crate::models::profesionales::Especialidad;
use crate::utils::date_utils;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EstadoTurno {
    Pendiente,
    Aceptado,
    Rechazado,
    Cancelado,
    Atendido,
    Desaprovechado,
}

impl EstadoTurno {
    pub const TODOS: [EstadoTurno; 6] = [
        EstadoTurno::Pendiente,
        EstadoTurno::Aceptado,
        EstadoTurno::Rechazado,
        EstadoTurno::Cancelado,
        EstadoTurno::Atendido,
        EstadoTurno::Desaprovechado,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoTurno::Pendiente => "pendiente",
            EstadoTurno::Aceptado => "aceptado",
            EstadoTurno::Rechazado => "rechazado",
            EstadoTurno::Cancelado => "cancelado",
            EstadoTurno::Atendido => "atendido",
            EstadoTurno::Desaprovechado => "desaprovechado",
        }
    }

    pub fn siguientes(&self) -> &'static [EstadoTurno] {
        match self {
            EstadoTurno::Pendiente => &[
                EstadoTurno::Aceptado,
                EstadoTurno::Rechazado,
                EstadoTurno::Cancelado,
            ],
            EstadoTurno::Aceptado => &[
                EstadoTurno::Cancelado,
                EstadoTurno::Atendido,
                EstadoTurno::Desaprovechado,
            ],
            EstadoTurno::Rechazado
            | EstadoTurno::Cancelado
            | EstadoTurno::Atendido
            | EstadoTurno::Desaprovechado => &[],
        }
    }

    pub fn es_terminal(&self) -> bool {
        self.siguientes().is_empty()
    }

    /// Accept/reject only apply to pending appointments; cancel to pending or accepted.
    pub fn transicionar(&self, accion: Accion) -> Result<EstadoTurno, TransicionInvalida> {
        let destino = match accion {
            Accion::Aceptar => EstadoTurno::Aceptado,
            Accion::Rechazar => EstadoTurno::Rechazado,
            Accion::Cancelar => EstadoTurno::Cancelado,
        };
        if self.siguientes().contains(&destino) {
            Ok(destino)
        } else {
            Err(TransicionInvalida {
                estado: self.to_string(),
                accion: accion.to_string(),
            })
        }
    }
}

impl fmt::Display for EstadoTurno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EstadoTurno {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EstadoTurno::TODOS
            .into_iter()
            .find(|estado| estado.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("estado de turno desconocido: {s}"))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PacienteResumen {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default)]
    pub dni: Option<String>,
}

impl PacienteResumen {
    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido).trim().to_string()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DoctorResumen {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default)]
    pub especialidad: Option<Especialidad>,
}

impl DoctorResumen {
    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido).trim().to_string()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Turno {
    pub id: i64,
    pub paciente_id: i64,
    pub doctor_id: i64,
    #[serde(default)]
    pub paciente: Option<PacienteResumen>,
    #[serde(default)]
    pub doctor: Option<DoctorResumen>,
    #[serde(with = "date_utils::fecha")]
    pub fecha: NaiveDate,
    #[serde(with = "date_utils::hora")]
    pub hora: NaiveTime,
    pub estado: EstadoTurno,
    #[serde(default, alias = "tiene_solicitud_cancelacion")]
    pub solicitud_cancelacion: bool,
}

impl Turno {
    pub fn nombre_paciente(&self) -> String {
        self.paciente
            .as_ref()
            .map(PacienteResumen::nombre_completo)
            .unwrap_or_default()
    }

    pub fn nombre_doctor(&self) -> String {
        self.doctor
            .as_ref()
            .map(DoctorResumen::nombre_completo)
            .unwrap_or_default()
    }

    pub fn nombre_especialidad(&self) -> String {
        self.doctor
            .as_ref()
            .and_then(|d| d.especialidad.as_ref())
            .map(|e| e.nombre.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pending_turno_admits_accept_reject_and_cancel() {
        let estado = EstadoTurno::Pendiente;
        assert_eq!(estado.transicionar(Accion::Aceptar), Ok(EstadoTurno::Aceptado));
        assert_eq!(estado.transicionar(Accion::Rechazar), Ok(EstadoTurno::Rechazado));
        assert_eq!(estado.transicionar(Accion::Cancelar), Ok(EstadoTurno::Cancelado));
    }

    #[test]
    fn accepted_turno_can_only_be_cancelled() {
        let estado = EstadoTurno::Aceptado;
        assert!(estado.transicionar(Accion::Aceptar).is_err());
        assert!(estado.transicionar(Accion::Rechazar).is_err());
        assert_eq!(estado.transicionar(Accion::Cancelar), Ok(EstadoTurno::Cancelado));
    }

    #[test]
    fn closed_states_are_terminal() {
        for estado in [
            EstadoTurno::Rechazado,
            EstadoTurno::Cancelado,
            EstadoTurno::Atendido,
            EstadoTurno::Desaprovechado,
        ] {
            assert!(estado.es_terminal(), "{estado} should be terminal");
        }
    }

    #[test]
    fn deserializes_laravel_turno() {
        let raw = json!({
            "id": 3,
            "paciente_id": 10,
            "doctor_id": 4,
            "fecha": "2025-05-02",
            "hora": "09:15:00",
            "estado": "pendiente",
            "paciente": {"id": 10, "nombre": "Ana", "apellido": "Gómez"},
            "doctor": {"id": 4, "nombre": "Luis", "apellido": "Paz",
                       "especialidad": {"id": 1, "nombre": "Cardiología"}},
            "tiene_solicitud_cancelacion": true
        });
        let turno: Turno = serde_json::from_value(raw).unwrap();
        assert_eq!(turno.hora, NaiveTime::from_hms_opt(9, 15, 0).unwrap());
        assert_eq!(turno.nombre_paciente(), "Ana Gómez");
        assert_eq!(turno.nombre_especialidad(), "Cardiología");
        assert!(turno.solicitud_cancelacion);
    }

    #[test]
    fn parses_estado_case_insensitively() {
        assert_eq!("Atendido".parse::<EstadoTurno>(), Ok(EstadoTurno::Atendido));
        assert!("borrado".parse::<EstadoTurno>().is_err());
    }
}
