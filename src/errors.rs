// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Komunikat błędu pobierania danych widoczny dla użytkownika.
pub const REMOTE_FETCH_FAILED_MESSAGE: &str = "SWAPI returns error";

#[derive(Debug, Error)]
pub enum AppError {
    // Sieć, status inny niż 2xx, zły JSON - wszystko trafia tutaj
    #[error("SWAPI returns error")]
    RemoteFetchFailed,

    #[error("Nieprawidłowe zapytanie: {0}")]
    BadRequest(String),

    #[error("Wewnętrzny błąd serwera: {0}")]
    InternalServerError(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Błąd komunikacji z SWAPI: {:?}", err);
        AppError::RemoteFetchFailed
    }
}

impl From<serde_qs::Error> for AppError {
    fn from(err: serde_qs::Error) -> Self {
        tracing::warn!("Nie można sparsować stanu siatki: {}", err);
        AppError::BadRequest(format!("Niepoprawny stan siatki: {}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::RemoteFetchFailed => (
                StatusCode::BAD_GATEWAY,
                REMOTE_FETCH_FAILED_MESSAGE.to_string(),
            ),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::InternalServerError(message) => {
                tracing::error!("Wewnętrzny błąd serwera: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failure_displays_fixed_message() {
        assert_eq!(AppError::RemoteFetchFailed.to_string(), REMOTE_FETCH_FAILED_MESSAGE);
    }

    #[test]
    fn remote_failure_maps_to_bad_gateway() {
        let response = AppError::RemoteFetchFailed.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = AppError::BadRequest("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
