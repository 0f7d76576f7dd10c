//! # Nimbus Config
//!
//! Configuration management for nimbus-bot: a TOML file overlaid with the
//! environment variables the bot has always been deployed with.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::{ConfigLoader, ENV_VARS};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
