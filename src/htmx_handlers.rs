// src/htmx_handlers.rs

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Response,
};
use maud::{Markup, html};

use crate::{
    errors::AppError,
    filters::ListingParams,
    models::{GridResult, PLANET_COLUMNS, SortOrder},
    pagination::{PageItem, PageLinks},
    response::build_response,
    state::AppState,
};

const GRID_TARGET: &str = "#planets-grid-container";
const FILTER_FORM_ID: &str = "planet-filter-form";

fn render_filter_form_maud(params: &ListingParams) -> Markup {
    html! {
        // Zmiana filtra (blur/enter), nie każde naciśnięcie klawisza, przeładowuje siatkę
        form id=(FILTER_FORM_ID) class="clr-form"
            "hx-get"="/htmx/planets"
            "hx-target"=(GRID_TARGET)
            "hx-swap"="outerHTML"
            "hx-trigger"="change, submit"
            onsubmit="return false;" {
            label .clr-control-label for="planet-name-filter" { "Filter by name" }
            input #planet-name-filter .clr-input type="text" name="name" value=(params.name().unwrap_or(""));
        }
    }
}

fn render_sort_header_maud(title: &str, column_id: &str, params: &ListingParams) -> Markup {
    let active = params.sort_by() == Some(column_id);
    let next_order = if active && params.order() == SortOrder::Asc {
        SortOrder::Desc
    } else {
        SortOrder::Asc
    };
    let query = format!("sort_by={}&order={}", column_id, next_order);
    let name_part = params
        .name()
        .map(|name| format!("&name={}", urlencoding::encode(name)))
        .unwrap_or_default();

    html! {
        a href=(format!("/?{}{}", query, name_part))
            "hx-get"=(format!("/htmx/planets?{}", query))
            "hx-include"="#planet-name-filter"
            "hx-target"=(GRID_TARGET)
            "hx-swap"="outerHTML" {
            (title)
            @if active {
                @match params.order() {
                    SortOrder::Asc => " ▲",
                    SortOrder::Desc => " ▼",
                }
            }
        }
    }
}

fn render_page_button_maud(label: &str, page_num: u64, links: &PageLinks, params: &ListingParams) -> Markup {
    let offset = links.offset_of(page_num);
    html! {
        a .btn.btn-sm href=(format!("/?offset={}{}", offset, params.filter_query_string()))
            "hx-get"=(format!("/htmx/planets?offset={}", offset))
            "hx-include"=(format!("#{}", FILTER_FORM_ID))
            "hx-target"=(GRID_TARGET)
            "hx-swap"="outerHTML" {
            (label)
        }
    }
}

fn render_pagination_maud(result: &GridResult, params: &ListingParams) -> Markup {
    let links = PageLinks::from_paginator(&result.paginator);
    let first_row = links.offset_of(links.current_page).saturating_add(1);
    let last_row = links
        .offset_of(links.current_page)
        .saturating_add(result.rows.len() as u64);

    html! {
        div #pagination-controls .datagrid-footer {
            @if !result.rows.is_empty() {
                span .datagrid-footer-description {
                    (first_row) " - " (last_row) " of " (result.paginator.total_count) " planets"
                }
            }
            @if links.total_pages > 1 {
                div .pagination {
                    @if links.has_previous() {
                        (render_page_button_maud("Previous", links.current_page - 1, &links, params))
                    } @else {
                        span .btn.btn-sm.disabled { "Previous" }
                    }
                    @for item in &links.items {
                        @match item {
                            PageItem::Page(page_num) if *page_num == links.current_page => {
                                span .btn.btn-sm.btn-primary { (page_num) }
                            },
                            PageItem::Page(page_num) => {
                                (render_page_button_maud(&page_num.to_string(), *page_num, &links, params))
                            },
                            PageItem::Gap => {
                                span .pagination-gap { "..." }
                            }
                        }
                    }
                    @if links.has_next() {
                        (render_page_button_maud("Next", links.current_page + 1, &links, params))
                    } @else {
                        span .btn.btn-sm.disabled { "Next" }
                    }
                }
            }
        }
    }
}

/// Siatka planet: tabela, stopka z paginacją i ukryty stan sortowania.
pub fn render_planet_grid_maud(result: &GridResult, params: &ListingParams) -> Markup {
    html! {
        div #planets-grid-container {
            // Pola powiązane z formularzem filtra, żeby zmiana filtra zachowała sortowanie
            @if let Some(sort_by) = params.sort_by() {
                input type="hidden" name="sort_by" value=(sort_by) form=(FILTER_FORM_ID);
                input type="hidden" name="order" value=(params.order().to_string()) form=(FILTER_FORM_ID);
            }
            table .table.datagrid {
                thead {
                    tr {
                        @for column in &PLANET_COLUMNS {
                            th {
                                @if column.sort {
                                    (render_sort_header_maud(column.title, column.id, params))
                                } @else {
                                    (column.title)
                                }
                            }
                        }
                    }
                }
                tbody {
                    @if result.rows.is_empty() {
                        tr {
                            td colspan=(PLANET_COLUMNS.len()) { "No planets found." }
                        }
                    } @else {
                        @for row in &result.rows {
                            tr "data-row-id"=(row.id().unwrap_or_default()) {
                                @for column in &PLANET_COLUMNS {
                                    td { (row.cell_text(column.id)) }
                                }
                            }
                        }
                    }
                }
            }
            (render_pagination_maud(result, params))
        }
    }
}

/// Błąd ładowania pokazujemy w miejscu siatki, z tym samym komunikatem co API.
pub fn render_load_error_maud(error: &AppError) -> Markup {
    html! {
        div #planets-grid-container {
            div .alert.alert-danger role="alert" {
                span .alert-text { (error.to_string()) }
            }
        }
    }
}

async fn load_grid_markup(app_state: &AppState, params: &ListingParams) -> Markup {
    let grid_state = params.to_grid_state();
    match app_state.data_provider.load(&grid_state).await {
        Ok(result) => render_planet_grid_maud(&result, params),
        Err(e) => {
            tracing::warn!("MAUD: nie udało się załadować planet: {}", e);
            render_load_error_maud(&e)
        }
    }
}

pub async fn list_planets_htmx_handler(
    State(app_state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Markup {
    tracing::info!("MAUD: /htmx/planets z parametrami: {:?}", params);
    load_grid_markup(&app_state, &params).await
}

pub async fn planets_page_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ListingParams>,
) -> Result<Response, AppError> {
    tracing::info!("MAUD: / z parametrami: {:?}", params);
    let grid = load_grid_markup(&app_state, &params).await;

    let page_content = html! {
        section #planets-page {
            h1 { "Planets" }
            (render_filter_form_maud(&params))
            (grid)
        }
    };

    build_response(&headers, &app_state.static_dir, page_content).await
}
