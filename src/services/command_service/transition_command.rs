use crate::models::Accion;
use crate::services::command_service::{AsyncCommandBase, Parametro};
use crate::viewmodels::{FuenteLista, ListaViewModel};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Accept / reject (or cancel) command bound to one list view-model.
///
/// `can_execute` is false while the list loads, for a null parameter, while the
/// id has an operation in flight, when the id is not loaded, or when the entity's
/// state does not admit the action. Every run ends with a reload and the id
/// released, whatever the backend answered.
pub struct ComandoTransicion<F: FuenteLista> {
    lista: Arc<ListaViewModel<F>>,
    accion: Accion,
    retardo: Duration,
    base: AsyncCommandBase<Parametro>,
}

impl<F: FuenteLista> ComandoTransicion<F> {
    pub fn new(lista: Arc<ListaViewModel<F>>, accion: Accion, retardo: Duration) -> Self {
        let para_predicado = Arc::clone(&lista);
        let base = AsyncCommandBase::with_predicate(move |parametro: &Parametro| {
            para_predicado.puede_transicionar(parametro, accion)
        });
        Self {
            lista,
            accion,
            retardo,
            base,
        }
    }

    pub fn accion(&self) -> Accion {
        self.accion
    }

    pub fn can_execute(&self, parametro: impl Into<Parametro>) -> bool {
        self.base.can_execute(&parametro.into())
    }

    /// Runs the transition. Returns `false` when the command was refused without
    /// effect: not executable, or the id was taken by another command of the
    /// same list in the meantime. An invalid parameter still counts as a run,
    /// since it reports "Parámetro inválido".
    pub async fn execute(&self, parametro: impl Into<Parametro>) -> bool {
        let lista = Arc::clone(&self.lista);
        let accion = self.accion;
        let retardo = self.retardo;
        self.base
            .execute(parametro.into(), move |parametro| {
                ejecutar(lista, accion, retardo, parametro)
            })
            .await
            .unwrap_or(false)
    }

    /// Changes whenever this command starts or finishes a run. The list's
    /// executing set has its own receiver for cross-command changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.base.subscribe()
    }
}

async fn ejecutar<F: FuenteLista>(
    lista: Arc<ListaViewModel<F>>,
    accion: Accion,
    retardo: Duration,
    parametro: Parametro,
) -> bool {
    let Some(id) = parametro.id() else {
        log::warn!("Parámetro inválido para {}: {}", accion, parametro);
        lista.set_mensaje_error("Parámetro inválido");
        return true;
    };

    // Accept and reject on the same id share this set and exclude each other.
    let Some(guard) = lista.ejecutando().try_insert(id) else {
        log::debug!("{} {}: ya hay una operación en curso", accion, id);
        return false;
    };

    if !retardo.is_zero() {
        tokio::time::sleep(retardo).await;
    }

    match AssertUnwindSafe(lista.transicionar(id, accion))
        .catch_unwind()
        .await
    {
        Ok(resultado) if resultado.exito => {
            log::info!("{} {}: {}", accion, id, resultado.mensaje);
            lista.set_mensaje_estado(resultado.mensaje);
        }
        Ok(resultado) => {
            log::warn!("{} {} falló: {}", accion, id, resultado.mensaje_completo());
            lista.set_mensaje_error(format!(
                "No se pudo {} #{}: {}",
                accion,
                id,
                resultado.mensaje_completo()
            ));
        }
        Err(panic) => {
            let texto = texto_panic(panic.as_ref());
            log::error!("{} {} abortó: {}", accion, id, texto);
            lista.set_mensaje_error(texto);
        }
    }

    lista.cargar().await;
    drop(guard);
    true
}

fn texto_panic(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Error inesperado".to_string()
    }
}
