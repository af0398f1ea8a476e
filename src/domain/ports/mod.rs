pub mod backend;
pub mod config_source;

pub use backend::{match_all_query, BackendError, BackendGateway};
pub use config_source::{ConfigError, ConfigSource};
