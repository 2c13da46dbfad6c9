use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

/// Ids with a mutating operation in flight.
///
/// Insertion is an atomic test-and-set and hands back an [`ExecutingGuard`];
/// the id is released when the guard drops, so every exit path of the
/// operation (including panics and dropped futures) frees it. Each change bumps
/// a version on a watch channel so observers can re-query `can_execute`.
#[derive(Debug)]
pub struct ExecutingIdSet<P> {
    inner: Arc<Inner<P>>,
}

#[derive(Debug)]
struct Inner<P> {
    ids: Mutex<HashSet<P>>,
    cambios: watch::Sender<u64>,
}

impl<P> Clone for ExecutingIdSet<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: Eq + Hash + Clone> Default for ExecutingIdSet<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Eq + Hash + Clone> ExecutingIdSet<P> {
    pub fn new() -> Self {
        let (cambios, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                ids: Mutex::new(HashSet::new()),
                cambios,
            }),
        }
    }

    fn ids(&self) -> MutexGuard<'_, HashSet<P>> {
        self.inner.ids.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn contains(&self, id: &P) -> bool {
        self.ids().contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    /// Marks `id` as executing. `None` if it already was.
    pub fn try_insert(&self, id: P) -> Option<ExecutingGuard<P>> {
        let inserted = self.ids().insert(id.clone());
        if !inserted {
            return None;
        }
        self.notificar();
        Some(ExecutingGuard {
            set: self.clone(),
            id: Some(id),
        })
    }

    fn remove(&self, id: &P) {
        let removed = self.ids().remove(id);
        if removed {
            self.notificar();
        }
    }

    fn notificar(&self) {
        self.inner.cambios.send_modify(|version| *version += 1);
    }

    /// Receiver that changes on every insert and release.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.cambios.subscribe()
    }
}

#[must_use = "the id is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ExecutingGuard<P: Eq + Hash + Clone> {
    set: ExecutingIdSet<P>,
    id: Option<P>,
}

impl<P: Eq + Hash + Clone> Drop for ExecutingGuard<P> {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.set.remove(&id);
        }
    }
}
