pub mod api;
pub mod category_theme;
pub mod config;
pub mod logging;
pub mod transaction_source;
pub mod transport;
