// src/mapper.rs
//
// Tłumaczenie stanu siatki na zapytanie SWAPI i odpowiedzi SWAPI na wynik siatki.
// Obie funkcje są czyste i bezstanowe.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use url::Url;

use crate::models::{ApiQuery, ApiResponse, GridRequestState, GridResult, GridRow, PAGE_SIZE, Paginator};

/// Stan siatki -> zapytanie do API. Nigdy nie zwraca błędu.
pub fn map_request(state: &GridRequestState) -> ApiQuery {
    let page = state
        .page
        .filter(|window| window.size > 0)
        .map(|window| (window.from / window.size).saturating_add(1))
        .unwrap_or(1);

    let filters = state
        .filters
        .iter()
        .map(|f| (f.property.clone(), f.value.clone()))
        .collect::<BTreeMap<_, _>>();

    ApiQuery {
        page: page.to_string(),
        filters,
    }
}

/// Odpowiedź API -> wiersze i paginator siatki.
///
/// `pageIndex` nie przychodzi z API, odtwarzamy go z kursorów:
/// `next` daje numer następnej strony minus 1, `previous` numer poprzedniej plus 1,
/// a przy braku obu kursorów zwracamy 0 (także gdy `count` przekracza rozmiar strony).
pub fn map_response(response: ApiResponse) -> GridResult {
    let page_index = response
        .next
        .as_deref()
        .and_then(cursor_page)
        .map(|next| next.saturating_sub(1))
        .or_else(|| {
            response
                .previous
                .as_deref()
                .and_then(cursor_page)
                .map(|previous| previous.saturating_add(1))
        })
        .unwrap_or(0);

    let rows = response
        .results
        .into_iter()
        .enumerate()
        .map(|(position, record)| materialize_row(position, record))
        .collect();

    GridResult {
        rows,
        paginator: Paginator {
            page_index,
            page_size: PAGE_SIZE,
            total_count: response.count,
        },
    }
}

/// Numer strony zakodowany w kursorze (`...?page=<n>`).
pub fn cursor_page(cursor: &str) -> Option<u64> {
    if let Ok(url) = Url::parse(cursor) {
        return url
            .query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse().ok());
    }

    // Kursor względny albo niepełny: bierzemy cyfry zaraz po "page="
    let (_, rest) = cursor.split_once("page=")?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

// Pozycyjne `id` nadpisuje ewentualne `id` z rekordu
fn materialize_row(position: usize, record: Value) -> GridRow {
    let mut row = match record {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };
    row.insert("id".to_string(), Value::from(position as u64));
    GridRow(row)
}
