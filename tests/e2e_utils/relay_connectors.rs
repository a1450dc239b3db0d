#![cfg(test)]
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpStream;

use pacdispatch::domain::{ConnectionRequest, ConnectorKind, ConnectorSpec, ProxyStream, Result};
use pacdispatch::ports::{ConnectorFactoryPort, ProxyConnectorPort};

/// Connector that only opens a TCP connection to the proxy, leaving the
/// protocol handshake to the relay on the other end.
pub struct RelayConnector {
    spec: ConnectorSpec,
    connects: Arc<AtomicUsize>,
}

#[async_trait]
impl ProxyConnectorPort for RelayConnector {
    async fn connect(&self, _request: &ConnectionRequest) -> Result<ProxyStream> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        let stream = TcpStream::connect(self.spec.proxy_addr()).await?;

        Ok(match self.spec.kind {
            ConnectorKind::HttpProxy => ProxyStream::forwarding(stream),
            _ => ProxyStream::tunneled(stream),
        })
    }
}

/// Factory counting how many connectors it built and how often they were used.
#[derive(Default)]
pub struct RelayConnectorFactory {
    specs: Mutex<Vec<ConnectorSpec>>,
    connects: Arc<AtomicUsize>,
}

impl RelayConnectorFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn built(&self) -> Vec<ConnectorSpec> {
        self.specs.lock().unwrap().clone()
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl ConnectorFactoryPort for RelayConnectorFactory {
    fn build(&self, spec: &ConnectorSpec) -> Result<Arc<dyn ProxyConnectorPort>> {
        self.specs.lock().unwrap().push(spec.clone());
        Ok(Arc::new(RelayConnector {
            spec: spec.clone(),
            connects: self.connects.clone(),
        }))
    }
}
