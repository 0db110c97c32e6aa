// src/grid.rs
//
// Kontroler siatki: trzyma bieżący stan tabeli, ładuje dane przez `DataProvider`
// i przeładowuje je po każdym zatwierdzeniu filtra.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, broadcast, watch};
use tokio::task::JoinHandle;

use crate::data_provider::DataProvider;
use crate::errors::AppError;
use crate::filter_state::FilterState;
use crate::models::{GridRequestState, GridResult, PAGE_SIZE, PageWindow};

/// Ostatni zastosowany wynik ładowania.
#[derive(Debug, Clone, Default)]
pub struct GridSnapshot {
    pub sequence: u64,
    pub state: GridRequestState,
    pub result: Option<Result<GridResult, String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied(GridResult),
    /// Odpowiedź przyszła po nowszej, została odrzucona.
    Superseded,
}

pub struct GridController {
    provider: Arc<dyn DataProvider>,
    filters: FilterState,
    state: Mutex<GridRequestState>,
    next_sequence: AtomicU64,
    snapshot: watch::Sender<GridSnapshot>,
}

impl GridController {
    pub fn new(provider: Arc<dyn DataProvider>, filters: FilterState) -> Self {
        let (snapshot, _) = watch::channel(GridSnapshot::default());
        Self {
            provider,
            filters,
            state: Mutex::new(GridRequestState::for_page(1)),
            next_sequence: AtomicU64::new(0),
            snapshot,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub async fn current_state(&self) -> GridRequestState {
        self.state.lock().await.clone()
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GridSnapshot> {
        self.snapshot.subscribe()
    }

    /// Jedno żądanie na wywołanie. Wynik jest stosowany tylko wtedy, gdy jego
    /// numer sekwencyjny jest nowszy niż ostatnio zastosowany.
    pub async fn load(&self, state: GridRequestState) -> Result<LoadOutcome, AppError> {
        // Numer nadajemy pod blokadą stanu, żeby kolejność numerów zgadzała się z kolejnością zapisów
        let sequence = {
            let mut current = self.state.lock().await;
            *current = state.clone();
            self.next_sequence.fetch_add(1, Ordering::SeqCst) + 1
        };

        tracing::info!("Ładowanie siatki #{} ze stanem: {:?}", sequence, state);
        let loaded = self.provider.load(&state).await;

        let snapshot_result = match &loaded {
            Ok(result) => Ok(result.clone()),
            Err(e) => Err(e.to_string()),
        };
        let applied = self.snapshot.send_if_modified(|current| {
            if sequence <= current.sequence {
                return false;
            }
            *current = GridSnapshot {
                sequence,
                state,
                result: Some(snapshot_result),
            };
            true
        });

        if !applied {
            tracing::debug!("Odrzucono nieaktualną odpowiedź #{}", sequence);
            return Ok(LoadOutcome::Superseded);
        }
        loaded.map(LoadOutcome::Applied)
    }

    /// Przeładowanie z bieżącą stroną i aktualną wartością filtrów.
    pub async fn refresh_state_force(&self) -> Result<LoadOutcome, AppError> {
        let mut state = self.current_state().await;
        state.replace_filters(&self.filters.current_value());
        self.load(state).await
    }

    pub async fn go_to_page(&self, page_number: u64) -> Result<LoadOutcome, AppError> {
        let mut state = self.current_state().await;
        state.page = Some(PageWindow {
            from: page_number.saturating_sub(1).saturating_mul(PAGE_SIZE),
            size: PAGE_SIZE,
        });
        self.load(state).await
    }

    /// Każde zatwierdzenie filtra wymusza jedno przeładowanie siatki.
    pub fn spawn_filter_reload(self: &Arc<Self>) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        let mut changes = self.filters.subscribe();

        tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(event) => {
                        tracing::info!(
                            "Filtr '{}' zatwierdzony ('{}'), przeładowanie siatki",
                            event.column,
                            event.value
                        );
                        if let Err(e) = controller.refresh_state_force().await {
                            tracing::warn!("Przeładowanie po zmianie filtra nieudane: {}", e);
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!("Pominięto {} zdarzeń filtra", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::{Notify, mpsc};

    use crate::mapper::map_request;
    use crate::models::Paginator;

    fn page_result(page: u64) -> GridResult {
        GridResult {
            rows: Vec::new(),
            paginator: Paginator {
                page_index: page,
                page_size: PAGE_SIZE,
                total_count: 61,
            },
        }
    }

    fn requested_page(state: &GridRequestState) -> u64 {
        map_request(state).page.parse().expect("page")
    }

    // Provider, który trzyma odpowiedź dla danej strony do czasu zwolnienia bramki
    struct GatedProvider {
        gates: std::sync::Mutex<HashMap<u64, Arc<Notify>>>,
        started: mpsc::UnboundedSender<GridRequestState>,
    }

    impl GatedProvider {
        fn gate(&self, page: u64) -> Arc<Notify> {
            self.gates
                .lock()
                .unwrap()
                .entry(page)
                .or_insert_with(|| Arc::new(Notify::new()))
                .clone()
        }
    }

    #[async_trait]
    impl DataProvider for GatedProvider {
        async fn load(&self, state: &GridRequestState) -> Result<GridResult, AppError> {
            let page = requested_page(state);
            let gate = self.gate(page);
            self.started.send(state.clone()).unwrap();
            gate.notified().await;
            Ok(page_result(page))
        }
    }

    struct RecordingProvider {
        started: mpsc::UnboundedSender<GridRequestState>,
        fail: bool,
    }

    #[async_trait]
    impl DataProvider for RecordingProvider {
        async fn load(&self, state: &GridRequestState) -> Result<GridResult, AppError> {
            self.started.send(state.clone()).unwrap();
            if self.fail {
                return Err(AppError::RemoteFetchFailed);
            }
            Ok(page_result(requested_page(state)))
        }
    }

    fn recording_controller(
        fail: bool,
    ) -> (Arc<GridController>, mpsc::UnboundedReceiver<GridRequestState>) {
        let (started, started_rx) = mpsc::unbounded_channel();
        let provider = Arc::new(RecordingProvider { started, fail });
        (
            Arc::new(GridController::new(provider, FilterState::new())),
            started_rx,
        )
    }

    #[tokio::test]
    async fn stale_response_is_discarded() {
        let (started, mut started_rx) = mpsc::unbounded_channel();
        let provider = Arc::new(GatedProvider {
            gates: std::sync::Mutex::new(HashMap::new()),
            started,
        });
        let controller = Arc::new(GridController::new(provider.clone(), FilterState::new()));

        let first = tokio::spawn({
            let controller = controller.clone();
            async move { controller.go_to_page(1).await }
        });
        started_rx.recv().await.expect("first request started");

        let second = tokio::spawn({
            let controller = controller.clone();
            async move { controller.go_to_page(2).await }
        });
        started_rx.recv().await.expect("second request started");

        provider.gate(2).notify_one();
        let second = second.await.unwrap().expect("second load");
        assert_eq!(second, LoadOutcome::Applied(page_result(2)));

        provider.gate(1).notify_one();
        let first = first.await.unwrap().expect("first load");
        assert_eq!(first, LoadOutcome::Superseded);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.sequence, 2);
        assert_eq!(snapshot.result, Some(Ok(page_result(2))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn applied_snapshot_matches_stored_state_under_contention() {
        let (started, mut started_rx) = mpsc::unbounded_channel();
        let provider = Arc::new(GatedProvider {
            gates: std::sync::Mutex::new(HashMap::new()),
            started,
        });
        let controller = Arc::new(GridController::new(provider.clone(), FilterState::new()));

        // Obie ładowania czekają na blokadę stanu i ruszają dopiero po jej zwolnieniu
        let guard = controller.state.lock().await;
        let loads: Vec<_> = (1..=2)
            .map(|page| {
                let controller = controller.clone();
                tokio::spawn(async move { controller.go_to_page(page).await })
            })
            .collect();
        tokio::task::yield_now().await;
        drop(guard);

        started_rx.recv().await.expect("first request started");
        started_rx.recv().await.expect("second request started");
        provider.gate(1).notify_one();
        provider.gate(2).notify_one();
        for load in loads {
            load.await.unwrap().expect("load");
        }

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.sequence, 2);
        assert_eq!(snapshot.state, controller.current_state().await);
    }

    #[tokio::test]
    async fn huge_page_number_does_not_overflow() {
        let (controller, mut started_rx) = recording_controller(false);
        controller.go_to_page(u64::MAX).await.expect("load");
        let state = started_rx.recv().await.expect("request");
        assert_eq!(state.page.map(|window| window.from), Some(u64::MAX));
    }

    #[tokio::test]
    async fn filter_commit_forces_reload_with_current_value() {
        let (controller, mut started_rx) = recording_controller(false);
        controller.go_to_page(3).await.expect("initial load");
        started_rx.recv().await.expect("initial request");

        let _reload = controller.spawn_filter_reload();
        controller.filters().commit("name", "Hoth");

        let state = started_rx.recv().await.expect("reload request");
        assert_eq!(state.filter_value("name"), Some("Hoth"));
        assert_eq!(requested_page(&state), 3);

        controller.filters().commit("name", "");
        let state = started_rx.recv().await.expect("reload request");
        assert!(state.filters.is_empty());
    }

    #[tokio::test]
    async fn failed_load_is_recorded_in_snapshot() {
        let (controller, _started_rx) = recording_controller(true);
        let mut results = controller.subscribe();

        let err = controller.go_to_page(1).await.unwrap_err();
        assert!(matches!(err, AppError::RemoteFetchFailed));

        results.changed().await.expect("snapshot update");
        let snapshot = results.borrow().clone();
        assert_eq!(snapshot.result, Some(Err("SWAPI returns error".to_string())));
    }

    #[tokio::test]
    async fn go_to_page_keeps_filters() {
        let (controller, mut started_rx) = recording_controller(false);
        controller.filters().commit("name", "oo");
        controller.refresh_state_force().await.expect("refresh");
        started_rx.recv().await.expect("refresh request");

        controller.go_to_page(2).await.expect("page 2");
        let state = started_rx.recv().await.expect("page request");
        assert_eq!(state.filter_value("name"), Some("oo"));
        assert_eq!(requested_page(&state), 2);
    }
}
