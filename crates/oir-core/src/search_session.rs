//! Live global search session
//!
//! Keystrokes go through a [`Debouncer`]; once the query settles a worker
//! runs it against the current [`SearchIndex`] after the configured search
//! latency and publishes a [`SearchState`] on a `watch` channel. Toggling a
//! filter reruns the last query.

use crate::config::RegistryConfig;
use crate::debounce::Debouncer;
use oir_search::{SearchFilters, SearchIndex, SearchKind, SearchResult};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// What the search panel shows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub searching: bool,
    /// Whether the results panel is shown
    pub open: bool,
}

#[derive(Debug)]
enum Command {
    Filters(SearchFilters),
    Index(Arc<SearchIndex>),
    Close,
}

/// Debounced search over a registry snapshot
#[derive(Debug)]
pub struct SearchSession {
    queries: Debouncer<String>,
    commands: mpsc::UnboundedSender<Command>,
    filters: Mutex<SearchFilters>,
    state: Arc<watch::Sender<SearchState>>,
    worker: JoinHandle<()>,
}

impl SearchSession {
    /// Start a session over `index`; must be called inside a tokio runtime
    #[must_use]
    pub fn new(index: SearchIndex, config: &RegistryConfig) -> Self {
        let (queries, settled) = Debouncer::new(config.debounce());
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(SearchState::default());
        let state = Arc::new(state);
        let filters = SearchFilters::new();

        let worker = tokio::spawn(run_worker(
            Arc::new(index),
            filters.clone(),
            config.search_latency(),
            settled,
            command_rx,
            Arc::clone(&state),
        ));

        Self {
            queries,
            commands,
            filters: Mutex::new(filters),
            state,
            worker,
        }
    }

    /// Update the query; the search itself runs once typing pauses
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.send_modify(|s| s.query.clone_from(&query));
        self.queries.push(query);
    }

    /// Flip a result category; returns whether it is now included
    pub fn toggle_filter(&self, kind: SearchKind) -> bool {
        let mut filters = self.filters.lock();
        let enabled = filters.toggle(kind);
        self.send(Command::Filters(filters.clone()));
        enabled
    }

    #[must_use]
    pub fn filters(&self) -> SearchFilters {
        self.filters.lock().clone()
    }

    /// Current panel state
    #[must_use]
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Hide the results panel, keeping the query
    pub fn close(&self) {
        self.send(Command::Close);
    }

    /// Search a fresh snapshot from now on
    pub fn replace_index(&self, index: SearchIndex) {
        self.send(Command::Index(Arc::new(index)));
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            tracing::debug!("search worker has stopped");
        }
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

async fn run_worker(
    mut index: Arc<SearchIndex>,
    mut filters: SearchFilters,
    latency: Duration,
    mut settled: mpsc::UnboundedReceiver<String>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    state: Arc<watch::Sender<SearchState>>,
) {
    let mut last = String::new();
    loop {
        tokio::select! {
            query = settled.recv() => {
                let Some(query) = query else { break };
                last = query;
            }
            command = commands.recv() => match command {
                Some(Command::Filters(next)) => filters = next,
                Some(Command::Index(next)) => index = next,
                Some(Command::Close) => {
                    state.send_modify(|s| s.open = false);
                    continue;
                }
                None => break,
            },
        }
        search(&index, &filters, &last, latency, &state).await;
    }
}

async fn search(
    index: &SearchIndex,
    filters: &SearchFilters,
    query: &str,
    latency: Duration,
    state: &watch::Sender<SearchState>,
) {
    if query.trim().is_empty() {
        state.send_modify(|s| {
            s.results.clear();
            s.searching = false;
            s.open = false;
        });
        return;
    }

    state.send_modify(|s| {
        s.searching = true;
        s.open = true;
    });
    tokio::time::sleep(latency).await;

    let results = index.search(&filters.clone().with_query(query));
    tracing::debug!(query, hits = results.len(), "search session updated");
    state.send_modify(|s| {
        s.results = results;
        s.searching = false;
    });
}
