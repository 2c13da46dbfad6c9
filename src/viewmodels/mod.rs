pub mod filtro;
pub mod list_viewmodel;
pub mod mensajes;
pub mod profesionales_viewmodel;
pub mod requests_viewmodel;
pub mod shifts_viewmodel;

pub use filtro::{CampoBusqueda, ClaveOrden, Columna, Direccion, Filtro, FiltroEstado, Orden};
pub use list_viewmodel::{Entidad, EstadoDe, FuenteLista, ListaViewModel};
pub use mensajes::Mensajes;
pub use profesionales_viewmodel::ProfesionalesViewModel;
pub use requests_viewmodel::{RequestsViewModel, SolicitudesFuente};
pub use shifts_viewmodel::{ShiftsViewModel, TurnosFuente};
