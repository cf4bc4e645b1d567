use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use catalog_core::{update, Effect, Msg, RequestId, SessionState, SessionView};
use catalog_logging::{catalog_debug, catalog_trace, catalog_warn};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::CatalogClient;

pub type SubscriptionId = u64;

/// Receives a snapshot after every observable session transition.
///
/// Called on the session task; implementations should return quickly.
pub trait SessionObserver: Send + Sync {
    fn state_changed(&self, view: &SessionView);
}

/// Forwards snapshots into an unbounded Tokio channel.
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<SessionView>,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::UnboundedSender<SessionView>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SessionView>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl SessionObserver for ChannelObserver {
    fn state_changed(&self, view: &SessionView) {
        let _ = self.tx.send(view.clone());
    }
}

struct Shared {
    view: Mutex<SessionView>,
    observers: Mutex<BTreeMap<SubscriptionId, Arc<dyn SessionObserver>>>,
    next_subscription: AtomicU64,
}

impl Shared {
    fn new(view: SessionView) -> Self {
        Self {
            view: Mutex::new(view),
            observers: Mutex::new(BTreeMap::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    fn publish(&self, view: SessionView) {
        *lock(&self.view) = view.clone();
        // Snapshot the registry so observers may (un)subscribe from the callback.
        let observers: Vec<_> = lock(&self.observers).values().cloned().collect();
        for observer in observers {
            observer.state_changed(&view);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A running list session.
///
/// All transitions go through one task that owns the [`SessionState`], so
/// messages are applied strictly one at a time in arrival order. Page fetches
/// run as separate tasks and report back through the same task.
pub struct SessionHandle {
    msg_tx: mpsc::UnboundedSender<Msg>,
    shared: Arc<Shared>,
}

impl SessionHandle {
    /// Start the session task. Must be called from within a Tokio runtime.
    /// The task stops once the handle is dropped.
    pub fn spawn(client: CatalogClient) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let shared = Arc::new(Shared::new(SessionState::new().view()));
        tokio::spawn(run_session(client, msg_rx, shared.clone()));
        Self { msg_tx, shared }
    }

    pub fn load_first_page(&self, query: impl Into<String>) {
        self.send(Msg::LoadFirstPage {
            query: query.into(),
        });
    }

    pub fn load_next_page(&self) {
        self.send(Msg::LoadNextPage);
    }

    pub fn refresh(&self) {
        self.send(Msg::Refresh);
    }

    pub fn search(&self, query: impl Into<String>) {
        self.send(Msg::Search(query.into()));
    }

    /// Latest published snapshot.
    pub fn state(&self) -> SessionView {
        lock(&self.shared.view).clone()
    }

    pub fn subscribe(&self, observer: Arc<dyn SessionObserver>) -> SubscriptionId {
        let id = self.shared.next_subscription.fetch_add(1, Ordering::Relaxed);
        lock(&self.shared.observers).insert(id, observer);
        catalog_debug!("session observer {} subscribed", id);
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = lock(&self.shared.observers).remove(&id).is_some();
        if removed {
            catalog_debug!("session observer {} unsubscribed", id);
        }
        removed
    }

    fn send(&self, msg: Msg) {
        if self.msg_tx.send(msg).is_err() {
            catalog_warn!("session task has stopped; message dropped");
        }
    }
}

async fn run_session(
    client: CatalogClient,
    mut msg_rx: mpsc::UnboundedReceiver<Msg>,
    shared: Arc<Shared>,
) {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Msg>();
    let mut state = SessionState::new();
    let mut in_flight: HashMap<RequestId, CancellationToken> = HashMap::new();

    loop {
        let msg = tokio::select! {
            Some(msg) = done_rx.recv() => msg,
            msg = msg_rx.recv() => match msg {
                Some(msg) => msg,
                None => break,
            },
        };

        if let Msg::PageLoaded { request_id, .. } = &msg {
            in_flight.remove(request_id);
        }

        let (next, effects) = update(state, msg);
        state = next;
        if state.consume_dirty() {
            let view = state.view();
            catalog_trace!(
                "session {:?}: {} result(s), has_more={} loading_more={}",
                view.status,
                view.results.len(),
                view.has_more,
                view.loading_more
            );
            shared.publish(view);
        }

        for effect in effects {
            match effect {
                Effect::FetchPage {
                    request_id,
                    page,
                    query,
                } => {
                    let token = CancellationToken::new();
                    in_flight.insert(request_id, token.clone());
                    spawn_fetch(client.clone(), request_id, page, query, token, done_tx.clone());
                }
                Effect::CancelFetch { request_id } => {
                    if let Some(token) = in_flight.remove(&request_id) {
                        token.cancel();
                    }
                }
            }
        }
    }

    for token in in_flight.values() {
        token.cancel();
    }
    catalog_debug!("session task stopped");
}

fn spawn_fetch(
    client: CatalogClient,
    request_id: RequestId,
    page: u32,
    query: Option<String>,
    token: CancellationToken,
    done_tx: mpsc::UnboundedSender<Msg>,
) {
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {
                catalog_debug!("page fetch {} (page {}) cancelled", request_id, page);
            }
            result = client.fetch_page(page, query.as_deref()) => {
                let result = result.map_err(|err| err.to_string());
                let _ = done_tx.send(Msg::PageLoaded { request_id, result });
            }
        }
    });
}
