//! tally-config
//!
//! Persistent client preferences and the stored session token.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;
pub mod token;

pub use error::ConfigError;
pub use manager::{resolve_base_dir, ConfigManager, BASE_DIR_ENV};
pub use model::{Config, API_URL_ENV};
pub use token::{StoredToken, TokenStore};
