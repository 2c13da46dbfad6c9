use crate::services::command_service::executing::ExecutingIdSet;
use std::future::Future;
use std::hash::Hash;
use tokio::sync::watch;

type Predicado<P> = Box<dyn Fn(&P) -> bool + Send + Sync>;

/// Reentrancy guard around an async action driven by UI triggers.
///
/// A parameter that is already executing cannot be executed again until its
/// body finishes; other parameters run concurrently. The body's output is
/// returned untouched, so errors are the caller's to handle.
pub struct AsyncCommandBase<P: Eq + Hash + Clone> {
    ejecutando: ExecutingIdSet<P>,
    puede_ejecutar: Predicado<P>,
}

impl<P: Eq + Hash + Clone> Default for AsyncCommandBase<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Eq + Hash + Clone> AsyncCommandBase<P> {
    pub fn new() -> Self {
        Self::with_predicate(|_| true)
    }

    /// `predicado` must not call back into this command.
    pub fn with_predicate<F>(predicado: F) -> Self
    where
        F: Fn(&P) -> bool + Send + Sync + 'static,
    {
        Self {
            ejecutando: ExecutingIdSet::new(),
            puede_ejecutar: Box::new(predicado),
        }
    }

    pub fn can_execute(&self, parametro: &P) -> bool {
        !self.ejecutando.contains(parametro) && (self.puede_ejecutar)(parametro)
    }

    /// Runs `body` unless the command cannot execute for `parametro`, in which
    /// case nothing happens and `None` comes back.
    pub async fn execute<F, Fut, T>(&self, parametro: P, body: F) -> Option<T>
    where
        F: FnOnce(P) -> Fut,
        Fut: Future<Output = T>,
    {
        if !(self.puede_ejecutar)(&parametro) {
            return None;
        }
        // Membership test and insert happen under one lock; a racing second
        // call for the same parameter lands here and bails.
        let _guard = self.ejecutando.try_insert(parametro.clone())?;
        Some(body(parametro).await)
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.ejecutando.subscribe()
    }
}
