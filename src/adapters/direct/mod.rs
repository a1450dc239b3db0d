use async_trait::async_trait;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::debug;

use crate::domain::{ConnectionRequest, ProxyError, ProxyStream, Result};
use crate::ports::ProxyConnectorPort;

/// Connects straight to the destination, wrapping the socket in TLS when the
/// request is secure.
#[derive(Clone)]
pub struct TokioDirectConnector {
    tls: TlsConnector,
}

impl TokioDirectConnector {
    /// Uses the bundled webpki root certificates.
    pub fn new() -> Result<Self> {
        let roots = RootCertStore {
            roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
        };
        let config = ClientConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
            .with_safe_default_protocol_versions()
            .map_err(|e| ProxyError::Tls(e.to_string()))?
            .with_root_certificates(roots)
            .with_no_client_auth();

        Ok(Self::with_tls_config(Arc::new(config)))
    }

    pub fn with_tls_config(config: Arc<ClientConfig>) -> Self {
        Self {
            tls: TlsConnector::from(config),
        }
    }
}

#[async_trait]
impl ProxyConnectorPort for TokioDirectConnector {
    async fn connect(&self, request: &ConnectionRequest) -> Result<ProxyStream> {
        debug!("Connecting directly to {}", request.authority());
        let stream = TcpStream::connect((request.host.as_str(), request.port)).await?;

        if !request.secure {
            return Ok(ProxyStream::Tcp(stream));
        }

        let server_name = ServerName::try_from(request.server_name().to_string())
            .map_err(|e| ProxyError::Tls(format!("invalid server name {}: {}", request.server_name(), e)))?;

        let tls_stream = self
            .tls
            .connect(server_name, stream)
            .await
            .map_err(|e| ProxyError::Tls(format!("handshake with {} failed: {}", request.authority(), e)))?;

        Ok(ProxyStream::Tls(Box::new(tls_stream)))
    }
}
