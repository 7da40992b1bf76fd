use thiserror::Error;

pub type MarketResult<T> = Result<T, MarketError>;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("Catalog document unreadable: {0}")]
    StoreUnreadable(String),

    #[error("Catalog document unwritable: {0}")]
    StoreUnwritable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MarketError {
    /// Get a short error kind name
    pub fn kind(&self) -> &'static str {
        match self {
            MarketError::Io(_) => "io_error",
            MarketError::MalformedRecord { .. } => "malformed_record",
            MarketError::StoreUnreadable(_) => "store_unreadable",
            MarketError::StoreUnwritable(_) => "store_unwritable",
            MarketError::Config(_) => "config_error",
            MarketError::Server(_) => "server_error",
            MarketError::Internal(_) => "internal_error",
        }
    }
}
