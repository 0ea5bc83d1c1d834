mod gateway;

pub use gateway::RemoteGateway;
