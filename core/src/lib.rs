//! Plugin market - read-mostly plugin catalog service

pub mod catalog;
pub mod config;
pub mod error;
pub mod server;
pub mod service;

pub use catalog::{CatalogStore, PluginRecord, default_plugins};
pub use config::Config;
pub use error::{MarketError, MarketResult};
pub use server::MarketServer;
pub use service::{CatalogService, HealthStatus};
