pub mod connector;
pub mod resolver;

pub use connector::{ConnectorFactoryPort, ProxyConnectorPort};
pub use resolver::{ProxyReply, ProxyResolverPort, ResolveFuture, ResolverAnswer};
