//! HTTP server module
//!
//! Exposes the catalog service over HTTP: routes, landing page and the
//! listener lifecycle.

pub mod market_server;
pub mod page;
pub mod routes;

pub use market_server::MarketServer;
pub use routes::router;
