// src/filter_state.rs
//
// Wspólny stan filtrów tabeli. Formularz filtra zapisuje tu wartości,
// a kontroler siatki czyta je przy wymuszonym przeładowaniu.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{broadcast, watch};

const CHANGE_CHANNEL_CAPACITY: usize = 64;

pub type FilterValues = BTreeMap<String, String>;

/// Zdarzenie "filtr zatwierdzony" (blur/change, nie każde naciśnięcie klawisza).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCommitted {
    pub column: String,
    pub value: String,
}

#[derive(Clone)]
pub struct FilterState {
    values: Arc<watch::Sender<FilterValues>>,
    changes: broadcast::Sender<FilterCommitted>,
}

impl FilterState {
    pub fn new() -> Self {
        let (values, _) = watch::channel(FilterValues::new());
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            values: Arc::new(values),
            changes,
        }
    }

    pub fn current_value(&self) -> FilterValues {
        self.values.borrow().clone()
    }

    /// Zapisuje wartość filtra i powiadamia obserwatorów. Każde zatwierdzenie
    /// to osobne zdarzenie, bez łączenia i opóźniania.
    pub fn commit(&self, column: &str, value: &str) {
        let value = value.trim().to_string();
        self.values.send_modify(|values| {
            if value.is_empty() {
                values.remove(column);
            } else {
                values.insert(column.to_string(), value.clone());
            }
        });

        let event = FilterCommitted {
            column: column.to_string(),
            value,
        };
        if self.changes.send(event).is_err() {
            tracing::debug!("Zatwierdzono filtr '{}', brak obserwatorów", column);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FilterCommitted> {
        self.changes.subscribe()
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}
