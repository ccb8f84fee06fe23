use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, trace};

use crate::store::StateStore;
use crate::topic;
use crate::value::{StateValue, SubscriptionId};

/// A boxed, `Send` future returned by request handlers.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type-erased request payload.
pub type Payload = Arc<dyn Any + Send + Sync>;

type ErasedHandler = Arc<dyn Fn(String, Payload, Arc<StateStore>) -> BoxFuture + Send + Sync>;

struct Route {
    pattern: String,
    handler: ErasedHandler,
}

/// The console state engine.
///
/// - `get(path)` reads state.
/// - `emit(path, payload)` runs every handler whose pattern matches,
///   sequentially, in registration order.
/// - `subscribe(pattern, f)` observes state writes.
///
/// ```ignore
/// let flux = Flux::new();
/// flux.on("app/initialize", |_, _, store| async move {
///     store.set("app/route", AppRoute("/login".into()));
/// });
/// flux.emit("app/initialize", ()).await;
/// ```
pub struct Flux {
    store: Arc<StateStore>,
    routes: RwLock<Vec<Route>>,
}

impl Flux {
    pub fn new() -> Self {
        Self {
            store: Arc::new(StateStore::new()),
            routes: RwLock::new(Vec::new()),
        }
    }

    // ── State ───────────────────────────────────────────────────────

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.store.get(path)
    }

    /// Typed read of the value at `path`.
    pub fn read<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.store.read(path)
    }

    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        self.store.scan(prefix)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.store.contains(path)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    // ── Requests ────────────────────────────────────────────────────

    /// Register an async handler for a request pattern (`+`/`#` allowed).
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler: ErasedHandler =
            Arc::new(move |path, payload, store| -> BoxFuture { Box::pin(handler(path, payload, store)) });
        self.routes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Route {
                pattern: pattern.to_string(),
                handler,
            });
    }

    /// Emit a request and wait for every matching handler to finish.
    /// An unmatched path is a no-op.
    pub async fn emit<T: Any + Send + Sync>(&self, path: &str, payload: T) {
        self.emit_arc(path, Arc::new(payload)).await;
    }

    pub async fn emit_arc(&self, path: &str, payload: Payload) {
        let handlers = self.handlers_for(path);
        if handlers.is_empty() {
            trace!(path, "no handler for request");
            return;
        }
        debug!(path, handlers = handlers.len(), "dispatching request");
        for handler in handlers {
            handler(path.to_string(), Arc::clone(&payload), Arc::clone(&self.store)).await;
        }
    }

    pub fn has_handler(&self, path: &str) -> bool {
        !self.handlers_for(path).is_empty()
    }

    // Snapshot so no lock is held across an await.
    fn handlers_for(&self, path: &str) -> Vec<ErasedHandler> {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| topic::matches(&r.pattern, path))
            .map(|r| Arc::clone(&r.handler))
            .collect()
    }

    // ── Subscriptions ───────────────────────────────────────────────

    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        self.store.subscribe(pattern, handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }
}

impl Default for Flux {
    fn default() -> Self {
        Self::new()
    }
}
