pub mod solicitud;

pub use solicitud::{EstadoSolicitud, Solicitud, TipoSolicitud};
