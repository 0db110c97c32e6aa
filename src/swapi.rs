// src/swapi.rs

use reqwest::Client;
use url::Url;

use crate::errors::AppError;
use crate::models::{ApiQuery, ApiResponse};

/// Klient listy planet SWAPI.
#[derive(Debug, Clone)]
pub struct SwapiClient {
    client: Client,
    planets_url: Url,
}

impl SwapiClient {
    pub fn new(planets_url: Url) -> Self {
        Self {
            client: Client::new(),
            planets_url,
        }
    }

    pub fn planets_url(&self) -> &Url {
        &self.planets_url
    }

    /// Pobiera jedną stronę planet. Każdy błąd (sieć, status, JSON) kończy się
    /// `AppError::RemoteFetchFailed`, szczegóły lądują tylko w logach.
    pub async fn fetch_planets(&self, query: &ApiQuery) -> Result<ApiResponse, AppError> {
        tracing::debug!(
            "GET {} page={} search='{}'",
            self.planets_url,
            query.page,
            query.search()
        );

        let response_result = self
            .client
            .get(self.planets_url.clone())
            .query(&query.query_pairs()[..])
            .send()
            .await;

        match response_result {
            Ok(resp) => {
                if resp.status().is_success() {
                    let api_response = resp.json::<ApiResponse>().await.map_err(|e| {
                        tracing::error!("Błąd deserializacji odpowiedzi SWAPI: {}", e);
                        AppError::RemoteFetchFailed
                    })?;
                    tracing::debug!(
                        "SWAPI zwróciło {} rekordów (count={})",
                        api_response.results.len(),
                        api_response.count
                    );
                    Ok(api_response)
                } else {
                    let status = resp.status();
                    let error_text = resp
                        .text()
                        .await
                        .unwrap_or_else(|_| "Brak treści błędu".to_string());
                    tracing::error!(
                        "SWAPI odpowiedziało błędem: Status={}, Treść={}",
                        status,
                        error_text
                    );
                    Err(AppError::RemoteFetchFailed)
                }
            }
            Err(e) => Err(AppError::from(e)),
        }
    }
}
