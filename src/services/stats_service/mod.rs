// src/services/stats_service/mod.rs

pub mod compute;

pub use compute::{ranking_doctores, resumen_turnos, tasa_asistencia};
