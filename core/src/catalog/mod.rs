//! Plugin catalog: record model, default contents and the file-backed store

pub mod record;
pub mod seed;
pub mod store;

pub use record::{PluginRecord, decode_document, encode_document};
pub use seed::default_plugins;
pub use store::{CatalogStore, SeedFn};
