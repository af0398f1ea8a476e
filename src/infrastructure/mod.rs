pub mod config_source;
pub mod memory;
pub mod opensearch;
