mod connection;
mod connector;

pub use connection::ProxyConnection;
pub use connector::HyperConnector;
