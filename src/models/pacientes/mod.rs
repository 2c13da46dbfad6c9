pub mod paciente;

pub use paciente::Paciente;
