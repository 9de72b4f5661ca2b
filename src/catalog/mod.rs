mod error;
mod parser;
mod sections;
mod service;
mod types;

pub use error::CatalogError;
pub use parser::parse_catalog;
pub use sections::{CatalogSection, ConfigError, SectionList};
pub use service::{CacheStatus, CatalogService, RefreshHandle, SectionView};
pub use types::ElementSet;
