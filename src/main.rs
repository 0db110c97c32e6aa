// src/main.rs

use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use planets_grid::build_router;
use planets_grid::config::AppConfig;
use planets_grid::data_provider::SwapiDataProvider;
use planets_grid::state::AppState;
use planets_grid::swapi::SwapiClient;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Inicjalizacja systemu logowania (tracing), poziom przez RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planets_grid=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Inicjalizacja serwera...");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Niepoprawna konfiguracja: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Źródło danych: {}", config.swapi_planets_url);

    let app_state = AppState {
        data_provider: Arc::new(SwapiDataProvider::new(SwapiClient::new(
            config.swapi_planets_url.clone(),
        ))),
        static_dir: config.static_dir.clone(),
    };

    let app = build_router(app_state);

    let addr = config.server_addr;
    tracing::info!("Serwer nasłuchuje na {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Nie można powiązać adresu {}: {}", addr, e);
            return;
        }
    };

    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        tracing::error!("Błąd serwera: {}", e);
    }
}
