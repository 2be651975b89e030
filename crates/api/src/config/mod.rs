//! Configuration module.

mod settings;

pub use settings::{Config, ConfigError};
