pub mod command_service;
pub mod stats_service;

pub use command_service::{AsyncCommandBase, ComandoTransicion, ExecutingIdSet, Parametro};
pub use stats_service::{ranking_doctores, resumen_turnos};
