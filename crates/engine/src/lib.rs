pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod page;
pub mod schema;

pub use config::{ConfigError, EngineConfig};
pub use engine::Engine;
pub use error::EngineError;
