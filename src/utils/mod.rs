pub mod config;
pub mod error;
pub mod text;

pub use config::AppConfig;
pub use error::ConfigError;
