use crate::api::ApiService;
use crate::error::ApiError;
use crate::models::{
    Accion, AppState, EstadoTurno, NuevoTurno, Reprogramacion, ResultadoApi, ResumenTurnos, Turno,
    TurnoFiltro,
};
use crate::services::command_service::ComandoTransicion;
use crate::services::stats_service::resumen_turnos;
use crate::utils::parse_fecha;
use crate::viewmodels::filtro::{CampoBusqueda, ClaveOrden, Columna, Filtro, FiltroEstado};
use crate::viewmodels::list_viewmodel::{Entidad, FuenteLista, ListaViewModel};
use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use std::time::Duration;

static COLUMNAS_TURNO: &[Columna<Turno>] = &[
    Columna {
        nombre: "id",
        clave: |t| ClaveOrden::Entero(t.id),
    },
    Columna {
        nombre: "paciente",
        clave: |t| ClaveOrden::texto(t.nombre_paciente()),
    },
    Columna {
        nombre: "profesional",
        clave: |t| ClaveOrden::texto(t.nombre_doctor()),
    },
    Columna {
        nombre: "especialidad",
        clave: |t| ClaveOrden::texto(t.nombre_especialidad()),
    },
    Columna {
        nombre: "fecha",
        clave: |t| ClaveOrden::FechaHora(t.fecha.and_time(t.hora)),
    },
    Columna {
        nombre: "estado",
        clave: |t| ClaveOrden::texto(t.estado.as_str()),
    },
];

impl Entidad for Turno {
    type Estado = EstadoTurno;

    fn id(&self) -> i64 {
        self.id
    }

    fn estado(&self) -> EstadoTurno {
        self.estado
    }

    fn admite(&self, accion: Accion) -> bool {
        self.estado.transicionar(accion).is_ok()
    }

    fn texto_busqueda(&self, campo: CampoBusqueda) -> String {
        match campo {
            CampoBusqueda::Paciente => self.nombre_paciente(),
            CampoBusqueda::Profesional => self.nombre_doctor(),
            CampoBusqueda::Fecha => self.fecha.format("%Y-%m-%d").to_string(),
        }
    }

    fn columnas() -> &'static [Columna<Self>] {
        COLUMNAS_TURNO
    }
}

/// Appointments; the status filter and search term are also sent to the
/// backend so it can narrow the result set.
pub struct TurnosFuente;

impl TurnosFuente {
    pub fn filtro_backend(filtro: &Filtro<EstadoTurno>) -> TurnoFiltro {
        let termino = filtro.busqueda.trim();
        let mut query = TurnoFiltro {
            estado: match filtro.estado {
                FiltroEstado::Todos => None,
                FiltroEstado::Solo(estado) => Some(estado),
            },
            ..Default::default()
        };
        if !termino.is_empty() {
            match filtro.campo {
                CampoBusqueda::Paciente => query.paciente = Some(termino.to_string()),
                CampoBusqueda::Profesional => query.doctor = Some(termino.to_string()),
                CampoBusqueda::Fecha => query.fecha = parse_fecha(termino),
            }
        }
        query
    }
}

impl FuenteLista for TurnosFuente {
    type Item = Turno;

    fn nombre(&self) -> String {
        "turnos".to_string()
    }

    async fn cargar(
        &self,
        api: &ApiService,
        filtro: &Filtro<EstadoTurno>,
    ) -> Result<Vec<Turno>, ApiError> {
        api.listar_turnos(&Self::filtro_backend(filtro)).await
    }

    async fn transicionar(&self, api: &ApiService, id: i64, accion: Accion) -> ResultadoApi {
        api.transicionar_turno(id, accion).await
    }
}

/// Appointment list with accept / reject / cancel commands plus reschedule
/// and create.
pub struct ShiftsViewModel {
    lista: Arc<ListaViewModel<TurnosFuente>>,
    pub aceptar: ComandoTransicion<TurnosFuente>,
    pub rechazar: ComandoTransicion<TurnosFuente>,
    pub cancelar: ComandoTransicion<TurnosFuente>,
}

impl ShiftsViewModel {
    pub fn new(api: Arc<ApiService>, retardo: Duration) -> Self {
        let lista = Arc::new(ListaViewModel::new(api, TurnosFuente));
        Self {
            aceptar: ComandoTransicion::new(Arc::clone(&lista), Accion::Aceptar, retardo),
            rechazar: ComandoTransicion::new(Arc::clone(&lista), Accion::Rechazar, retardo),
            cancelar: ComandoTransicion::new(Arc::clone(&lista), Accion::Cancelar, retardo),
            lista,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(Arc::clone(&state.api), state.config.retardo_minimo)
    }

    pub fn lista(&self) -> &ListaViewModel<TurnosFuente> {
        &self.lista
    }

    pub async fn cargar(&self) -> bool {
        self.lista.cargar().await
    }

    /// Moves an appointment. The returned result keeps the backend's per-field
    /// validation errors for the form.
    pub async fn reprogramar(&self, id: i64, fecha: NaiveDate, hora: NaiveTime) -> ResultadoApi {
        if self.lista.esta_cargando() {
            return ResultadoApi::fallo("Espere a que termine la carga");
        }
        let Some(turno) = self.lista.buscar(id) else {
            let resultado = ResultadoApi::fallo(format!("Turno {} no encontrado", id));
            self.lista.set_mensaje_error(resultado.mensaje.clone());
            return resultado;
        };
        if turno.estado.es_terminal() {
            let resultado = ResultadoApi::fallo(format!(
                "El turno {} está {} y no puede reprogramarse",
                id, turno.estado
            ));
            self.lista.set_mensaje_error(resultado.mensaje.clone());
            return resultado;
        }
        let Some(guard) = self.lista.ejecutando().try_insert(id) else {
            return ResultadoApi::fallo("Ya hay una operación en curso para este turno");
        };

        let resultado = self
            .lista
            .api()
            .reprogramar_turno(id, &Reprogramacion { fecha, hora })
            .await;
        self.publicar(&resultado);
        self.lista.cargar().await;
        drop(guard);
        resultado
    }

    pub async fn crear(&self, turno: &NuevoTurno) -> ResultadoApi {
        let resultado = self.lista.api().crear_turno(turno).await;
        self.publicar(&resultado);
        if resultado.exito {
            self.lista.cargar().await;
        }
        resultado
    }

    pub async fn disponibles(
        &self,
        doctor_id: i64,
        fecha: NaiveDate,
    ) -> Result<Vec<NaiveTime>, ApiError> {
        self.lista.api().turnos_disponibles(doctor_id, fecha).await
    }

    /// Counters over what is currently visible.
    pub fn resumen(&self) -> ResumenTurnos {
        resumen_turnos(&self.lista.visibles())
    }

    fn publicar(&self, resultado: &ResultadoApi) {
        if resultado.exito {
            self.lista.set_mensaje_estado(resultado.mensaje.clone());
        } else {
            self.lista.set_mensaje_error(resultado.mensaje_completo());
        }
    }
}
