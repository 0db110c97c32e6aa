// src/filters.rs
use serde::Deserialize;

use crate::models::{
    ColumnFilter, ColumnSort, GridRequestState, PAGE_SIZE, PLANET_COLUMNS, PageWindow, SortOrder,
};

/// Parametry fragmentu siatki wysyłane przez htmx (paginacja, filtr, sortowanie).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    // Paginacja
    #[serde(default)]
    pub offset: Option<u64>,

    // Filtry
    #[serde(default)]
    pub name: Option<String>,

    // Sortowanie
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}

impl ListingParams {
    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }

    pub fn name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Tylko kolumny oznaczone jako sortowalne.
    pub fn sort_by(&self) -> Option<&str> {
        let requested = self.sort_by.as_deref()?;
        PLANET_COLUMNS
            .iter()
            .find(|column| column.sort && column.id == requested)
            .map(|column| column.id)
    }

    pub fn order(&self) -> SortOrder {
        self.order
            .as_deref()
            .and_then(|o| o.parse().ok())
            .unwrap_or_default()
    }

    pub fn to_grid_state(&self) -> GridRequestState {
        GridRequestState {
            page: Some(PageWindow {
                from: self.offset(),
                size: PAGE_SIZE,
            }),
            filters: self
                .name()
                .map(|name| ColumnFilter {
                    property: "name".to_string(),
                    value: name.to_string(),
                })
                .into_iter()
                .collect(),
            sort: self.sort_by().map(|by| ColumnSort {
                by: by.to_string(),
                order: self.order(),
            }),
        }
    }

    /// Query string filtrów i sortowania (bez offsetu), zaczyna się od `&`.
    pub fn filter_query_string(&self) -> String {
        let mut filter_parts = Vec::new();
        if let Some(name) = self.name() {
            filter_parts.push(format!("name={}", urlencoding::encode(name)));
        }
        if let Some(sort_by) = self.sort_by() {
            filter_parts.push(format!("sort_by={}", sort_by));
            filter_parts.push(format!("order={}", self.order()));
        }

        if filter_parts.is_empty() {
            String::new()
        } else {
            format!("&{}", filter_parts.join("&"))
        }
    }
}
