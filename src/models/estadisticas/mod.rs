pub mod stats;

pub use stats::{EstadisticasDoctor, EstadisticasGlobales, RangoFechas, ResumenTurnos};
