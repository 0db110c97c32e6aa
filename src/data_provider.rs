// src/data_provider.rs

use async_trait::async_trait;

use crate::errors::AppError;
use crate::mapper::{map_request, map_response};
use crate::models::{GridRequestState, GridResult};
use crate::swapi::SwapiClient;

/// Źródło danych siatki: wywoływane przy każdej zmianie stanu tabeli.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn load(&self, state: &GridRequestState) -> Result<GridResult, AppError>;
}

pub struct SwapiDataProvider {
    client: SwapiClient,
}

impl SwapiDataProvider {
    pub fn new(client: SwapiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataProvider for SwapiDataProvider {
    async fn load(&self, state: &GridRequestState) -> Result<GridResult, AppError> {
        let query = map_request(state);
        let response = self.client.fetch_planets(&query).await?;
        Ok(map_response(response))
    }
}
