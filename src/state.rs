// src/state.rs

use std::sync::Arc;

use crate::data_provider::DataProvider;

#[derive(Clone)]
pub struct AppState {
    pub data_provider: Arc<dyn DataProvider>,
    pub static_dir: String,
}
