pub mod gateway;
pub mod wire;

pub use gateway::OpenSearchGateway;
