mod stock;

pub use stock::{Stock, StockResponse};
