use std::sync::Arc;
use crate::db::StockStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StockStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn StockStore>) -> Self {
        Self { store }
    }
}
