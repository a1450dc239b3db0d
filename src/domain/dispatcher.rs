use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use super::{
    resolver_url, select_directive, ConnectionRequest, ConnectorCache, ConnectorKind, Directive, ProxyError, ProxyKind,
    ProxyRoute, ProxyStream, Result,
};
use crate::config::AgentConfig;
use crate::ports::{ConnectorFactoryPort, ProxyConnectorPort, ProxyReply, ProxyResolverPort};

/// Raw directive plus the connector kind built for it. `SOCKS*` directives
/// only ever map to one kind; `PROXY`/`HTTP`/`HTTPS` get a forwarding and a
/// tunnelling connector depending on the request.
type ConnectorKey = (String, ConnectorKind);

/// Routes every outbound connection according to the resolver's answer.
///
/// One dispatcher is built per resolver and shared by all requests using it;
/// the proxy connectors it builds live as long as it does.
pub struct Dispatcher {
    resolver: Arc<dyn ProxyResolverPort>,
    factory: Arc<dyn ConnectorFactoryPort>,
    direct: Arc<dyn ProxyConnectorPort>,
    connectors: ConnectorCache<ConnectorKey, Arc<dyn ProxyConnectorPort>>,
    resolve_timeout: Option<Duration>,
}

impl Dispatcher {
    pub fn new(
        resolver: Arc<dyn ProxyResolverPort>,
        factory: Arc<dyn ConnectorFactoryPort>,
        direct: Arc<dyn ProxyConnectorPort>,
    ) -> Self {
        Self {
            resolver,
            factory,
            direct,
            connectors: ConnectorCache::unbounded(),
            resolve_timeout: None,
        }
    }

    pub fn with_config(mut self, config: &AgentConfig) -> Self {
        self.resolve_timeout = config.resolve_timeout();
        if let Some(capacity) = config.cache_capacity() {
            self.connectors = ConnectorCache::with_capacity(capacity);
        }
        self
    }

    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = Some(timeout);
        self
    }

    /// Resolves, selects and connects one request.
    pub async fn connect(&self, request: &ConnectionRequest) -> Result<ProxyStream> {
        let span = info_span!(
            "dispatch",
            id = %Uuid::new_v4(),
            host = %request.host,
            port = request.port,
            secure = request.secure,
        );

        async {
            let url = resolver_url(request);
            debug!(%url, "resolving proxy");
            let answer = self.resolve(&url).await?;

            let directive = select_directive(answer.as_deref())?;
            debug!(%directive, "using proxy");

            let connector = match &directive.route {
                ProxyRoute::Direct => self.direct.clone(),
                ProxyRoute::Upstream { kind, address } => {
                    self.proxy_connector(&directive, *kind, address, request.secure).await?
                }
            };

            let stream = connector.connect(request).await;
            match &stream {
                Ok(_) => info!(%directive, "connected"),
                Err(e) => debug!(%directive, "connection failed: {}", e),
            }
            stream
        }
        .instrument(span)
        .await
    }

    /// Runs [`Dispatcher::connect`] in the background and hands the outcome to
    /// `on_complete`, which is called exactly once.
    pub fn dispatch<F>(self: &Arc<Self>, request: ConnectionRequest, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<ProxyStream>) + Send + 'static,
    {
        let dispatcher = self.clone();
        tokio::spawn(async move {
            let result = dispatcher.connect(&request).await;
            on_complete(result);
        })
    }

    /// Number of proxy connectors currently cached.
    pub async fn cached_connectors(&self) -> usize {
        self.connectors.len().await
    }

    async fn resolve(&self, url: &str) -> Result<Option<String>> {
        let (reply, receiver) = ProxyReply::channel();
        let pending = self.resolver.resolve_proxy(url, reply.clone());

        let answer = async move {
            match pending {
                Some(pending) => {
                    let mut receiver = receiver;
                    tokio::select! {
                        answer = &mut receiver => answer,
                        answer = pending => {
                            reply.send(answer);
                            receiver.await
                        }
                    }
                }
                None => {
                    drop(reply);
                    receiver.await
                }
            }
        };

        let answer = match self.resolve_timeout {
            Some(limit) => tokio::time::timeout(limit, answer)
                .await
                .map_err(|_| ProxyError::ResolutionTimeout)?,
            None => answer.await,
        };

        answer.map_err(|_| ProxyError::ResolutionFailed("resolver dropped the request without answering".into()))?
    }

    async fn proxy_connector(
        &self,
        directive: &Directive,
        kind: ProxyKind,
        address: &str,
        secure: bool,
    ) -> Result<Arc<dyn ProxyConnectorPort>> {
        let spec = kind.connector_spec(address, secure)?;
        self.connectors
            .get_or_create((directive.raw.clone(), spec.kind), || {
                info!(%directive, %spec, "building proxy connector");
                self.factory.build(&spec)
            })
            .await
    }
}
