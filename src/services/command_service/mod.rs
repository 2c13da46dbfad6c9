pub mod async_command;
pub mod executing;
pub mod parametro;
pub mod transition_command;

pub use async_command::AsyncCommandBase;
pub use executing::{ExecutingGuard, ExecutingIdSet};
pub use parametro::Parametro;
pub use transition_command::ComandoTransicion;
