use crate::api::ApiService;
use crate::error::ApiError;
use crate::models::{Accion, ResultadoApi};
use crate::services::command_service::{ExecutingIdSet, Parametro};
use crate::viewmodels::filtro::{
    buscar_columna, ordenar, CampoBusqueda, Columna, Filtro, FiltroEstado, Orden,
};
use crate::viewmodels::mensajes::Mensajes;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// An entity shown in a list view-model.
pub trait Entidad: Clone + Send + Sync + 'static {
    type Estado: Copy + PartialEq + fmt::Display + Send + Sync + 'static;

    fn id(&self) -> i64;
    fn estado(&self) -> Self::Estado;
    /// Whether the state machine allows `accion` from the current state.
    fn admite(&self, accion: Accion) -> bool;
    fn texto_busqueda(&self, campo: CampoBusqueda) -> String;
    fn columnas() -> &'static [Columna<Self>];
}

pub type EstadoDe<F> = <<F as FuenteLista>::Item as Entidad>::Estado;

/// Where a list comes from and how its items change state on the backend.
pub trait FuenteLista: Send + Sync + 'static {
    type Item: Entidad;

    fn nombre(&self) -> String;

    fn cargar(
        &self,
        api: &ApiService,
        filtro: &Filtro<EstadoDe<Self>>,
    ) -> impl Future<Output = Result<Vec<Self::Item>, ApiError>> + Send;

    fn transicionar(
        &self,
        api: &ApiService,
        id: i64,
        accion: Accion,
    ) -> impl Future<Output = ResultadoApi> + Send;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct CargandoGuard<'a>(&'a AtomicBool);

impl Drop for CargandoGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Shared state behind a list screen: loaded items, filter, sort, loading
/// flag, message panel and the ids with an operation in flight.
pub struct ListaViewModel<F: FuenteLista> {
    api: Arc<ApiService>,
    fuente: F,
    items: RwLock<Vec<F::Item>>,
    filtro: Mutex<Filtro<EstadoDe<F>>>,
    orden: Mutex<Orden>,
    cargando: AtomicBool,
    recarga_pendiente: AtomicBool,
    ejecutando: ExecutingIdSet<i64>,
    mensajes: Mutex<Mensajes>,
}

impl<F: FuenteLista> ListaViewModel<F> {
    pub fn new(api: Arc<ApiService>, fuente: F) -> Self {
        Self {
            api,
            fuente,
            items: RwLock::new(Vec::new()),
            filtro: Mutex::new(Filtro::default()),
            orden: Mutex::new(Orden::default()),
            cargando: AtomicBool::new(false),
            recarga_pendiente: AtomicBool::new(false),
            ejecutando: ExecutingIdSet::new(),
            mensajes: Mutex::new(Mensajes::default()),
        }
    }

    pub fn api(&self) -> &ApiService {
        &self.api
    }

    pub fn fuente(&self) -> &F {
        &self.fuente
    }

    pub fn esta_cargando(&self) -> bool {
        self.cargando.load(Ordering::Acquire)
    }

    pub fn ejecutando(&self) -> &ExecutingIdSet<i64> {
        &self.ejecutando
    }

    /// Reloads from the backend. A call that arrives while a load is running
    /// returns `false` at once and the running load repeats when it finishes,
    /// so the last snapshot stored is never older than the last request.
    /// Failures land in the error message.
    pub async fn cargar(&self) -> bool {
        self.recarga_pendiente.store(true, Ordering::Release);
        let mut cargado = false;
        loop {
            if self
                .cargando
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                log::debug!(
                    "Carga de {} en curso, se repetirá al terminar",
                    self.fuente.nombre()
                );
                return cargado;
            }
            let flag = CargandoGuard(&self.cargando);
            while self.recarga_pendiente.swap(false, Ordering::AcqRel) {
                cargado = self.cargar_una_vez().await;
            }
            drop(flag);

            // A request may have slipped in between the last swap and the release.
            if !self.recarga_pendiente.load(Ordering::Acquire) {
                return cargado;
            }
        }
    }

    async fn cargar_una_vez(&self) -> bool {
        let filtro = self.filtro();
        match self.fuente.cargar(&self.api, &filtro).await {
            Ok(items) => {
                log::info!("{}: {} elementos", self.fuente.nombre(), items.len());
                *self.items.write().unwrap_or_else(PoisonError::into_inner) = items;
                true
            }
            Err(e) => {
                log::error!("No se pudieron cargar {}: {}", self.fuente.nombre(), e);
                self.set_mensaje_error(format!(
                    "No se pudieron cargar {}: {}",
                    self.fuente.nombre(),
                    e
                ));
                false
            }
        }
    }

    /// Every loaded item, in backend order.
    pub fn items(&self) -> Vec<F::Item> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn buscar(&self, id: i64) -> Option<F::Item> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    /// Loaded items after the status filter, the text search and the sort.
    pub fn visibles(&self) -> Vec<F::Item> {
        let filtro = self.filtro();
        let orden = self.orden();
        let mut visibles: Vec<F::Item> = self
            .items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|item| filtro.estado.admite(&item.estado()))
            .filter(|item| filtro.coincide_texto(&item.texto_busqueda(filtro.campo)))
            .cloned()
            .collect();
        ordenar(&mut visibles, <F::Item as Entidad>::columnas(), &orden);
        visibles
    }

    pub fn filtro(&self) -> Filtro<EstadoDe<F>> {
        lock(&self.filtro).clone()
    }

    pub fn orden(&self) -> Orden {
        *lock(&self.orden)
    }

    pub async fn set_filtro_estado(&self, estado: FiltroEstado<EstadoDe<F>>) {
        lock(&self.filtro).estado = estado;
        self.cargar().await;
    }

    pub async fn set_busqueda(&self, busqueda: impl Into<String>, campo: CampoBusqueda) {
        {
            let mut filtro = lock(&self.filtro);
            filtro.busqueda = busqueda.into();
            filtro.campo = campo;
        }
        self.cargar().await;
    }

    /// Header click on `columna`. Unknown columns are ignored and return `false`.
    pub async fn ordenar_por(&self, columna: &str) -> bool {
        let Some(columna) = buscar_columna(<F::Item as Entidad>::columnas(), columna) else {
            log::warn!("Columna de orden desconocida: {}", columna);
            return false;
        };
        lock(&self.orden).alternar(columna.nombre);
        self.cargar().await;
        true
    }

    pub fn mensajes(&self) -> Mensajes {
        lock(&self.mensajes).clone()
    }

    pub fn mensaje_estado(&self) -> Option<String> {
        lock(&self.mensajes).estado.clone()
    }

    pub fn mensaje_error(&self) -> Option<String> {
        lock(&self.mensajes).error.clone()
    }

    pub fn set_mensaje_estado(&self, mensaje: impl Into<String>) {
        lock(&self.mensajes).set_estado(mensaje);
    }

    pub fn set_mensaje_error(&self, mensaje: impl Into<String>) {
        lock(&self.mensajes).set_error(mensaje);
    }

    pub fn limpiar_mensajes(&self) {
        lock(&self.mensajes).limpiar();
    }

    /// Guard predicate shared by every transition command of this list.
    ///
    /// A non-null parameter that is not an id passes here on purpose: the
    /// command itself rejects it with a visible message.
    pub fn puede_transicionar(&self, parametro: &Parametro, accion: Accion) -> bool {
        if self.esta_cargando() || parametro.es_nulo() {
            return false;
        }
        let Some(id) = parametro.id() else {
            return true;
        };
        if self.ejecutando.contains(&id) {
            return false;
        }
        self.buscar(id)
            .map(|item| item.admite(accion))
            .unwrap_or(false)
    }

    pub async fn transicionar(&self, id: i64, accion: Accion) -> ResultadoApi {
        self.fuente.transicionar(&self.api, id, accion).await
    }
}
