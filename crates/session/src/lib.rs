//! Simulation session store.
//!
//! A [`SessionStore`] owns exactly one [`SimulationSession`] and is the only
//! writer to it. [`SessionStore::start`] resets the session, publishes the
//! `Running` phase and spawns the network exchange; the spawned task publishes
//! the outcome when it settles. Readers take snapshots, hold a `watch`
//! receiver, or register a listener that is called on every transition.

use std::sync::Arc;

use impact_client::{ClientError, SimulationBackend, SimulationRequest};
use impact_config::{SessionConfig, StalePolicy};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info, warn};

mod state;

pub use impact_client::SimulationResult;
pub use state::{ErrorKind, Phase, SessionError, SimulationSession};

type Listener = Arc<dyn Fn(&SimulationSession) + Send + Sync>;

/// Handle to the session store. Clones share the same session.
pub struct SessionStore<B: SimulationBackend> {
    shared: Arc<Shared<B>>,
}

impl<B: SimulationBackend> Clone for SessionStore<B> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

struct Shared<B> {
    backend: B,
    policy: StalePolicy,
    runtime: Handle,
    state: watch::Sender<SimulationSession>,
    listeners: Mutex<Vec<Listener>>,
}

impl<B: SimulationBackend> SessionStore<B> {
    /// Create a store that spawns its exchanges on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime, like `tokio::spawn`.
    pub fn new(backend: B, config: &SessionConfig) -> Self {
        Self::with_runtime(backend, config, Handle::current())
    }

    /// Create a store that spawns its exchanges on `runtime`.
    pub fn with_runtime(backend: B, config: &SessionConfig, runtime: Handle) -> Self {
        let (state, _) = watch::channel(SimulationSession::idle());
        Self {
            shared: Arc::new(Shared {
                backend,
                policy: config.stale_completions,
                runtime,
                state,
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Start a simulation from raw user input.
    ///
    /// Returns as soon as the session is `Running`; invalid input moves the
    /// session straight to `Failed` without a network call.
    pub fn start(&self, asteroid_id: &str, impact_lat: f64, impact_lon: f64) {
        match SimulationRequest::new(asteroid_id, impact_lat, impact_lon) {
            Ok(request) => self.start_request(request),
            Err(err) => {
                warn!(%err, "rejected simulation input");
                let error = SessionError::from(&err);
                self.shared.publish(|session| {
                    *session = SimulationSession::failed(session.generation() + 1, error);
                    true
                });
            }
        }
    }

    /// Start a simulation from an already validated request.
    pub fn start_request(&self, request: SimulationRequest) {
        let mut generation = 0;
        self.shared.publish(|session| {
            generation = session.generation() + 1;
            *session = SimulationSession::running(generation);
            true
        });
        info!(
            generation,
            asteroid_id = request.asteroid_id(),
            lat = request.impact_lat(),
            lon = request.impact_lon(),
            "simulation started"
        );

        let shared = Arc::clone(&self.shared);
        self.shared.runtime.spawn(async move {
            let outcome = shared.backend.execute(&request).await;
            shared.settle(generation, outcome);
        });
    }

    /// Copy of the current session.
    pub fn snapshot(&self) -> SimulationSession {
        self.shared.state.borrow().clone()
    }

    /// Receiver that observes every published session.
    pub fn subscribe(&self) -> watch::Receiver<SimulationSession> {
        self.shared.state.subscribe()
    }

    /// Register a callback invoked synchronously after each transition.
    pub fn on_change<F>(&self, listener: F)
    where
        F: Fn(&SimulationSession) + Send + Sync + 'static,
    {
        self.shared.listeners.lock().push(Arc::new(listener));
    }

    /// Wait until the session leaves `Running` and return that snapshot.
    pub async fn settled(&self) -> SimulationSession {
        let mut rx = self.subscribe();
        match rx.wait_for(|session| !session.phase().is_running()).await {
            Ok(session) => session.clone(),
            // The sender lives in `shared`, which `self` keeps alive.
            Err(_) => self.snapshot(),
        }
    }

    /// How completions from superseded runs are handled.
    pub fn policy(&self) -> StalePolicy {
        self.shared.policy
    }
}

impl<B> Shared<B> {
    fn settle(&self, generation: u64, outcome: Result<SimulationResult, ClientError>) {
        let policy = self.policy;
        self.publish(|session| {
            let latest = session.generation();
            if generation != latest && policy == StalePolicy::DiscardStale {
                debug!(generation, latest, "discarding stale simulation completion");
                return false;
            }
            *session = match outcome {
                Ok(result) => {
                    info!(generation, "simulation succeeded");
                    SimulationSession::succeeded(latest, result)
                }
                Err(err) => {
                    warn!(generation, %err, "simulation failed");
                    SimulationSession::failed(latest, SessionError::from(&err))
                }
            };
            true
        });
    }

    /// Apply `modify` under the state lock, then hand the resulting session
    /// to the listeners if it changed anything.
    fn publish(&self, modify: impl FnOnce(&mut SimulationSession) -> bool) {
        let mut published = None;
        self.state.send_if_modified(|session| {
            if !modify(session) {
                return false;
            }
            published = Some(session.clone());
            true
        });
        let Some(snapshot) = published else {
            return;
        };
        debug!(
            phase = snapshot.phase().label(),
            generation = snapshot.generation(),
            "session updated"
        );
        let listeners: Vec<Listener> = self.listeners.lock().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}
