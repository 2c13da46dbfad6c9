pub mod stats;

pub use stats::{ranking_doctores, resumen_turnos, tasa_asistencia};
