use crate::error::TransicionInvalida;
use crate::models::accion::Accion;
use crate::models::turnos::Turno;
use crate::utils::date_utils;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EstadoSolicitud {
    Pendiente,
    Aceptado,
    Rechazado,
}

impl EstadoSolicitud {
    pub const TODOS: [EstadoSolicitud; 3] = [
        EstadoSolicitud::Pendiente,
        EstadoSolicitud::Aceptado,
        EstadoSolicitud::Rechazado,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoSolicitud::Pendiente => "pendiente",
            EstadoSolicitud::Aceptado => "aceptado",
            EstadoSolicitud::Rechazado => "rechazado",
        }
    }

    pub fn es_terminal(&self) -> bool {
        !matches!(self, EstadoSolicitud::Pendiente)
    }

    /// Only pending requests move; accept and reject are the only actions.
    pub fn transicionar(&self, accion: Accion) -> Result<EstadoSolicitud, TransicionInvalida> {
        match (self, accion) {
            (EstadoSolicitud::Pendiente, Accion::Aceptar) => Ok(EstadoSolicitud::Aceptado),
            (EstadoSolicitud::Pendiente, Accion::Rechazar) => Ok(EstadoSolicitud::Rechazado),
            _ => Err(TransicionInvalida {
                estado: self.to_string(),
                accion: accion.to_string(),
            }),
        }
    }
}

impl fmt::Display for EstadoSolicitud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EstadoSolicitud {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EstadoSolicitud::TODOS
            .into_iter()
            .find(|estado| estado.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("estado de solicitud desconocido: {s}"))
    }
}

/// Which request family: each has its own endpoint prefix under `/turnos`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TipoSolicitud {
    Reprogramacion,
    Cancelacion,
}

impl TipoSolicitud {
    pub fn ruta(&self) -> &'static str {
        match self {
            TipoSolicitud::Reprogramacion => "turnos/solicitudes-reprogramacion",
            TipoSolicitud::Cancelacion => "turnos/solicitudes-cancelacion",
        }
    }

    /// Key under which `{mensaje, <clave>: [...]}` envelopes carry the list.
    pub fn clave_lista(&self) -> &'static str {
        "solicitudes"
    }
}

impl fmt::Display for TipoSolicitud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TipoSolicitud::Reprogramacion => write!(f, "reprogramacion"),
            TipoSolicitud::Cancelacion => write!(f, "cancelacion"),
        }
    }
}

impl FromStr for TipoSolicitud {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reprogramacion" | "reprogramación" => Ok(TipoSolicitud::Reprogramacion),
            "cancelacion" | "cancelación" => Ok(TipoSolicitud::Cancelacion),
            other => Err(format!("tipo de solicitud desconocido: {other}")),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Solicitud {
    pub id: i64,
    pub turno_id: i64,
    pub estado: EstadoSolicitud,
    #[serde(default, alias = "nueva_fecha", with = "date_utils::fecha_opcional")]
    pub fecha: Option<NaiveDate>,
    #[serde(default, alias = "nueva_hora", with = "date_utils::hora_opcional")]
    pub hora: Option<NaiveTime>,
    #[serde(default)]
    pub motivo: Option<String>,
    #[serde(default)]
    pub turno: Option<Turno>,
}

impl Solicitud {
    pub fn nombre_paciente(&self) -> String {
        self.turno
            .as_ref()
            .map(Turno::nombre_paciente)
            .unwrap_or_default()
    }

    pub fn nombre_doctor(&self) -> String {
        self.turno
            .as_ref()
            .map(Turno::nombre_doctor)
            .unwrap_or_default()
    }

    /// The proposed date, falling back to the original appointment date.
    pub fn fecha_referencia(&self) -> Option<NaiveDate> {
        self.fecha.or_else(|| self.turno.as_ref().map(|t| t.fecha))
    }
}
