pub mod turno;

pub use turno::{DoctorResumen, EstadoTurno, PacienteResumen, Turno};
