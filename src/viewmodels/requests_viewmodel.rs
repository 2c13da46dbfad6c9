use crate::api::ApiService;
use crate::error::ApiError;
use crate::models::{Accion, AppState, EstadoSolicitud, ResultadoApi, Solicitud, TipoSolicitud};
use crate::services::command_service::ComandoTransicion;
use crate::viewmodels::filtro::{CampoBusqueda, ClaveOrden, Columna, Filtro};
use crate::viewmodels::list_viewmodel::{Entidad, FuenteLista, ListaViewModel};
use std::sync::Arc;
use std::time::Duration;

static COLUMNAS_SOLICITUD: &[Columna<Solicitud>] = &[
    Columna {
        nombre: "id",
        clave: |s| ClaveOrden::Entero(s.id),
    },
    Columna {
        nombre: "turno",
        clave: |s| ClaveOrden::Entero(s.turno_id),
    },
    Columna {
        nombre: "paciente",
        clave: |s| ClaveOrden::texto(s.nombre_paciente()),
    },
    Columna {
        nombre: "profesional",
        clave: |s| ClaveOrden::texto(s.nombre_doctor()),
    },
    Columna {
        nombre: "fecha",
        clave: |s| match (s.fecha_referencia(), s.hora) {
            (Some(fecha), Some(hora)) => ClaveOrden::FechaHora(fecha.and_time(hora)),
            (Some(fecha), None) => ClaveOrden::Fecha(fecha),
            (None, _) => ClaveOrden::Vacio,
        },
    },
    Columna {
        nombre: "estado",
        clave: |s| ClaveOrden::texto(s.estado.as_str()),
    },
];

impl Entidad for Solicitud {
    type Estado = EstadoSolicitud;

    fn id(&self) -> i64 {
        self.id
    }

    fn estado(&self) -> EstadoSolicitud {
        self.estado
    }

    fn admite(&self, accion: Accion) -> bool {
        self.estado.transicionar(accion).is_ok()
    }

    fn texto_busqueda(&self, campo: CampoBusqueda) -> String {
        match campo {
            CampoBusqueda::Paciente => self.nombre_paciente(),
            CampoBusqueda::Profesional => self.nombre_doctor(),
            CampoBusqueda::Fecha => self
                .fecha_referencia()
                .map(|f| f.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    fn columnas() -> &'static [Columna<Self>] {
        COLUMNAS_SOLICITUD
    }
}

/// Requests of one family; filtering happens client-side.
pub struct SolicitudesFuente {
    tipo: TipoSolicitud,
}

impl SolicitudesFuente {
    pub fn new(tipo: TipoSolicitud) -> Self {
        Self { tipo }
    }

    pub fn tipo(&self) -> TipoSolicitud {
        self.tipo
    }
}

impl FuenteLista for SolicitudesFuente {
    type Item = Solicitud;

    fn nombre(&self) -> String {
        format!("solicitudes de {}", self.tipo)
    }

    async fn cargar(
        &self,
        api: &ApiService,
        _filtro: &Filtro<EstadoSolicitud>,
    ) -> Result<Vec<Solicitud>, ApiError> {
        api.listar_solicitudes(self.tipo).await
    }

    async fn transicionar(&self, api: &ApiService, id: i64, accion: Accion) -> ResultadoApi {
        api.transicionar_solicitud(self.tipo, id, accion).await
    }
}

/// Reschedule or cancellation requests awaiting a decision.
pub struct RequestsViewModel {
    lista: Arc<ListaViewModel<SolicitudesFuente>>,
    pub aceptar: ComandoTransicion<SolicitudesFuente>,
    pub rechazar: ComandoTransicion<SolicitudesFuente>,
}

impl RequestsViewModel {
    pub fn new(api: Arc<ApiService>, tipo: TipoSolicitud, retardo: Duration) -> Self {
        let lista = Arc::new(ListaViewModel::new(api, SolicitudesFuente::new(tipo)));
        Self {
            aceptar: ComandoTransicion::new(Arc::clone(&lista), Accion::Aceptar, retardo),
            rechazar: ComandoTransicion::new(Arc::clone(&lista), Accion::Rechazar, retardo),
            lista,
        }
    }

    pub fn from_state(state: &AppState, tipo: TipoSolicitud) -> Self {
        Self::new(Arc::clone(&state.api), tipo, state.config.retardo_minimo)
    }

    pub fn tipo(&self) -> TipoSolicitud {
        self.lista.fuente().tipo()
    }

    pub fn lista(&self) -> &ListaViewModel<SolicitudesFuente> {
        &self.lista
    }

    pub async fn cargar(&self) -> bool {
        self.lista.cargar().await
    }

    pub fn pendientes(&self) -> Vec<Solicitud> {
        self.lista
            .visibles()
            .into_iter()
            .filter(|s| s.estado == EstadoSolicitud::Pendiente)
            .collect()
    }

    pub fn can_execute_accept_request(&self, id: Option<i64>) -> bool {
        self.aceptar.can_execute(id)
    }

    pub fn can_execute_reject_request(&self, id: Option<i64>) -> bool {
        self.rechazar.can_execute(id)
    }
}
