// src/models/mod.rs

pub mod accion;
pub mod api;
pub mod app;
pub mod estadisticas;
pub mod pacientes;
pub mod profesionales;
pub mod solicitudes;
pub mod turnos;

pub use accion::Accion;
pub use api::{NuevoTurno, Reprogramacion, ResultadoApi, TurnoFiltro};
pub use app::{AppState, Config};
pub use estadisticas::{EstadisticasDoctor, EstadisticasGlobales, RangoFechas, ResumenTurnos};
pub use pacientes::Paciente;
pub use profesionales::{Doctor, Especialidad, Horario, NuevoProfesional};
pub use solicitudes::{EstadoSolicitud, Solicitud, TipoSolicitud};
pub use turnos::{EstadoTurno, Turno};
