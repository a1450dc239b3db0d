use crate::domain::{ConnectionRequest, ConnectorSpec, ProxyStream, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Port for establishing the socket of one request
///
/// Implemented by the direct connector and by every protocol-specific proxy
/// connector. The returned future completes exactly once, with either a
/// connected (and, for proxies, negotiated) stream or an error.
#[async_trait]
pub trait ProxyConnectorPort: Send + Sync {
    async fn connect(&self, request: &ConnectionRequest) -> Result<ProxyStream>;
}

/// Port for building the long-lived connector of a proxy directive
pub trait ConnectorFactoryPort: Send + Sync {
    fn build(&self, spec: &ConnectorSpec) -> Result<Arc<dyn ProxyConnectorPort>>;
}
