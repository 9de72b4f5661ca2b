use thiserror::Error;

use crate::cache::CacheError;
use crate::catalog::sections::ConfigError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog truncated after name line {name:?} (line {line})")]
    Truncated { name: String, line: usize },
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Cache(#[from] CacheError),
}
