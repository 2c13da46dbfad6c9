use crate::models::turnos::EstadoTurno;
use crate::utils::date_utils;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `desde`/`hasta` filter shared by every statistics endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RangoFechas {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "date_utils::fecha_opcional"
    )]
    pub desde: Option<NaiveDate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "date_utils::fecha_opcional"
    )]
    pub hasta: Option<NaiveDate>,
}

impl RangoFechas {
    pub fn new(desde: Option<NaiveDate>, hasta: Option<NaiveDate>) -> Self {
        Self { desde, hasta }
    }

    pub fn es_valido(&self) -> bool {
        match (self.desde, self.hasta) {
            (Some(desde), Some(hasta)) => desde <= hasta,
            _ => true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EstadisticasDoctor {
    #[serde(default)]
    pub doctor_id: Option<i64>,
    #[serde(default)]
    pub doctor: Option<String>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pendientes: u64,
    #[serde(default)]
    pub aceptados: u64,
    #[serde(default)]
    pub atendidos: u64,
    #[serde(default)]
    pub cancelados: u64,
    #[serde(default)]
    pub rechazados: u64,
    #[serde(default)]
    pub desaprovechados: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EstadisticasGlobales {
    #[serde(default)]
    pub total_turnos: u64,
    #[serde(default)]
    pub total_pacientes: u64,
    #[serde(default)]
    pub total_doctores: u64,
    #[serde(default)]
    pub por_estado: HashMap<String, u64>,
    #[serde(default)]
    pub por_especialidad: HashMap<String, u64>,
}

/// Summary computed locally from a loaded appointment list.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ResumenTurnos {
    pub total: usize,
    pub por_estado: HashMap<EstadoTurno, usize>,
    /// atendidos / (atendidos + desaprovechados), `None` when nothing closed yet.
    pub tasa_asistencia: Option<f64>,
    pub doctor_mas_solicitado: Option<String>,
    pub con_solicitud_cancelacion: usize,
}
