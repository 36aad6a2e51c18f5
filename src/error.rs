//! Startup errors.
//!
//! Play itself never fails: invalid selections are ignored. Only building
//! a session from bad configuration or catalog data can be rejected.

use thiserror::Error;

use crate::cards::CatalogError;
use crate::core::ConfigError;

/// Main error type for the crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for convenience.
pub type Result<T> = std::result::Result<T, Error>;
