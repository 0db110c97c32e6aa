// src/models.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{Display, EnumString};

/// Stała liczba wierszy na stronę. SWAPI zawsze zwraca po 10 rekordów.
pub const PAGE_SIZE: u64 = 10;

// --- Stan siatki (to, co wysyła komponent tabeli) ---

/// Okno stronicowania: offset pierwszego wiersza i rozmiar strony.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageWindow {
    pub from: u64,
    pub size: u64,
}

/// Wartość filtra dla jednej kolumny.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnFilter {
    pub property: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnSort {
    pub by: String,
    #[serde(default)]
    pub order: SortOrder,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridRequestState {
    #[serde(default)]
    pub page: Option<PageWindow>,
    #[serde(default)]
    pub filters: Vec<ColumnFilter>,
    #[serde(default)]
    pub sort: Option<ColumnSort>,
}

impl GridRequestState {
    /// Stan dla strony `page_number` (liczonej od 1) o stałym rozmiarze.
    pub fn for_page(page_number: u64) -> Self {
        Self {
            page: Some(PageWindow {
                from: page_number.saturating_sub(1) * PAGE_SIZE,
                size: PAGE_SIZE,
            }),
            ..Self::default()
        }
    }

    pub fn filter_value(&self, property: &str) -> Option<&str> {
        self.filters
            .iter()
            .rev()
            .find(|f| f.property == property)
            .map(|f| f.value.as_str())
    }

    /// Zastępuje wszystkie filtry nowymi wartościami (pomija puste).
    pub fn replace_filters(&mut self, values: &BTreeMap<String, String>) {
        self.filters = values
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(property, value)| ColumnFilter {
                property: property.clone(),
                value: value.clone(),
            })
            .collect();
    }
}

// --- Model zapytania do SWAPI ---

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ApiQuery {
    pub page: String,
    pub filters: BTreeMap<String, String>,
}

impl ApiQuery {
    /// Wartość parametru `search`: filtr kolumny "name" albo pusty string.
    pub fn search(&self) -> &str {
        self.filters.get("name").map(String::as_str).unwrap_or("")
    }

    /// Parametry zapytania dokładnie w formacie oczekiwanym przez SWAPI.
    pub fn query_pairs(&self) -> [(&'static str, &str); 2] {
        [("page", self.page.as_str()), ("search", self.search())]
    }
}

/// Surowa odpowiedź SWAPI dla listy planet.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ApiResponse {
    pub results: Vec<Value>,
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
}

// --- Model wyniku dla siatki ---

/// Wiersz siatki: rekord z API z doklejonym syntetycznym `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct GridRow(pub Map<String, Value>);

impl GridRow {
    pub fn id(&self) -> Option<u64> {
        self.0.get("id").and_then(Value::as_u64)
    }

    /// Tekst komórki dla danej kolumny (stringi bez cudzysłowów).
    pub fn cell_text(&self, column: &str) -> String {
        match self.0.get(column) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Paginator {
    pub page_index: u64,
    pub page_size: u64,
    #[serde(rename = "length")]
    pub total_count: u64,
}

impl Paginator {
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridResult {
    pub rows: Vec<GridRow>,
    pub paginator: Paginator,
}

// --- Opis tabeli ---

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ColumnDescription {
    pub id: &'static str,
    pub title: &'static str,
    pub sort: bool,
}

pub const PLANET_COLUMNS: [ColumnDescription; 2] = [
    ColumnDescription {
        id: "name",
        title: "Name",
        sort: true,
    },
    ColumnDescription {
        id: "population",
        title: "Population",
        sort: false,
    },
];
