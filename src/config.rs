// src/config.rs

use std::env;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

const DEFAULT_SWAPI_PLANETS_URL: &str = "https://swapi.dev/api/planets/";
const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SWAPI_PLANETS_URL nie jest poprawnym adresem URL: {0}")]
    InvalidSwapiUrl(#[from] url::ParseError),

    #[error("SERVER_ADDR nie jest poprawnym adresem: {0}")]
    InvalidServerAddr(#[from] std::net::AddrParseError),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub swapi_planets_url: Url,
    pub server_addr: SocketAddr,
    pub static_dir: String,
}

impl AppConfig {
    /// Wczytuje konfigurację ze zmiennych środowiskowych (z wartościami domyślnymi).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let swapi_planets_url = lookup("SWAPI_PLANETS_URL")
            .unwrap_or_else(|| DEFAULT_SWAPI_PLANETS_URL.to_string());
        let server_addr =
            lookup("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());
        let static_dir = lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string());

        Ok(Self {
            swapi_planets_url: Url::parse(&swapi_planets_url)?,
            server_addr: server_addr.parse()?,
            static_dir,
        })
    }
}
