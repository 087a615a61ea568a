//! Error types for the listings ecosystem.
//!
//! The filter engine itself never fails; these errors come from loading
//! feeds, configuration and favorites.

use thiserror::Error;

/// Errors that can occur while loading or persisting listing data.
#[derive(Error, Debug)]
pub enum ListingsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed parse error: {0}")]
    FeedParse(String),

    #[error("Feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown timezone '{0}'")]
    InvalidTimezone(String),

    #[error("Unknown date bucket '{0}'")]
    UnknownQuickDate(String),

    #[error("Favorites error: {0}")]
    Favorites(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for listings operations.
pub type ListingsResult<T> = Result<T, ListingsError>;
