use crate::models::turnos::EstadoTurno;
use crate::utils::date_utils;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Query string of `GET /turnos`. Unset filters are left out of the URL.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TurnoFiltro {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub especialidad: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "date_utils::fecha_opcional"
    )]
    pub fecha: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paciente: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<EstadoTurno>,
}

/// Body of `PATCH /turnos/{id}/reprogramar`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Reprogramacion {
    #[serde(with = "date_utils::fecha")]
    pub fecha: NaiveDate,
    #[serde(with = "date_utils::hora")]
    pub hora: NaiveTime,
}

/// `POST /turnos/store` takes its fields in the query string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NuevoTurno {
    pub paciente_id: i64,
    pub doctor_id: i64,
    #[serde(with = "date_utils::fecha")]
    pub fecha: NaiveDate,
    #[serde(with = "date_utils::hora")]
    pub hora: NaiveTime,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DisponiblesParams {
    pub doctor_id: i64,
    #[serde(with = "date_utils::fecha")]
    pub fecha: NaiveDate,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BusquedaParams {
    pub busqueda: String,
}
