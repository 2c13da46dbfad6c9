pub mod profesional;

pub use profesional::{Doctor, Especialidad, Horario, NuevoProfesional};
