//! Client core of the SaludTotal appointment system: typed access to the
//! backend, guarded state-changing commands and the list view-models a
//! front-end binds to.

pub mod api;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod viewmodels;

pub use api::ApiService;
pub use error::{ApiError, ConfigError, TransicionInvalida};
pub use models::{AppState, Config, ResultadoApi};
