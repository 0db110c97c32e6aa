// src/handlers.rs

use axum::{
    Json,
    extract::{RawQuery, State},
};

use crate::{
    errors::AppError,
    models::{GridRequestState, GridResult},
    state::AppState,
};

/// Przeglądarki kodują nawiasy (`page%5Bfrom%5D`), serde_qs oczekuje `page[from]`.
fn normalize_brackets(query: &str) -> String {
    query
        .replace("%5B", "[")
        .replace("%5b", "[")
        .replace("%5D", "]")
        .replace("%5d", "]")
}

pub fn parse_grid_state(query: Option<&str>) -> Result<GridRequestState, AppError> {
    match query {
        Some(q) if !q.is_empty() => Ok(serde_qs::from_str(&normalize_brackets(q))?),
        _ => Ok(GridRequestState::default()),
    }
}

/// Stan siatki w formacie komponentu tabeli -> wynik siatki jako JSON.
pub async fn list_planets_handler(
    State(app_state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<GridResult>, AppError> {
    let grid_state = parse_grid_state(query.as_deref())?;
    tracing::info!(
        "Obsłużono zapytanie GET /api/planets ze stanem: {:?}",
        grid_state
    );

    let result = app_state.data_provider.load(&grid_state).await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColumnSort, PageWindow, SortOrder};

    #[test]
    fn parses_grid_state_from_bracket_notation() {
        let state = parse_grid_state(Some(
            "page%5Bfrom%5D=20&page%5Bsize%5D=10&filters%5B0%5D%5Bproperty%5D=name&filters%5B0%5D%5Bvalue%5D=Tatooine&sort[by]=name&sort[order]=desc",
        ))
        .expect("grid state");

        assert_eq!(state.page, Some(PageWindow { from: 20, size: 10 }));
        assert_eq!(state.filter_value("name"), Some("Tatooine"));
        assert_eq!(
            state.sort,
            Some(ColumnSort {
                by: "name".into(),
                order: SortOrder::Desc
            })
        );
    }

    #[test]
    fn missing_query_is_default_state() {
        assert_eq!(parse_grid_state(None).unwrap(), GridRequestState::default());
        assert_eq!(parse_grid_state(Some("")).unwrap(), GridRequestState::default());
    }

    #[test]
    fn invalid_page_is_bad_request() {
        let err = parse_grid_state(Some("page[from]=abc&page[size]=10")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
