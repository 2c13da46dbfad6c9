// src/api/mod.rs

pub mod clasificacion;
pub mod client;
pub mod envelope;
pub mod estadisticas;
pub mod pacientes;
pub mod profesionales;
pub mod solicitudes;
pub mod turnos;

pub use clasificacion::clasificar;
pub use client::ApiService;
