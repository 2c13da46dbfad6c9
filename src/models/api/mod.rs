pub mod params;
pub mod resultado;

pub use params::{BusquedaParams, DisponiblesParams, NuevoTurno, Reprogramacion, TurnoFiltro};
pub use resultado::ResultadoApi;
