use hyper::Uri;
use url::Url;

use super::{ProxyError, Result};

/// Per-attempt connection parameters handed over by the HTTP client layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRequest {
    pub host: String,
    pub port: u16,
    /// Request path, optionally followed by `?query`.
    pub path: String,
    pub secure: bool,
    pub servername: Option<String>,
}

impl ConnectionRequest {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            path: "/".to_string(),
            secure: false,
            servername: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_servername(mut self, servername: impl Into<String>) -> Self {
        self.servername = Some(servername.into());
        self
    }

    /// Builds a request from the destination URI hyper asks a connector for.
    ///
    /// `https` and `wss` schemes mark the request as secure.
    pub fn from_uri(uri: &Uri) -> Result<Self> {
        let authority = uri.authority().ok_or(ProxyError::MissingHost)?;
        let secure = matches!(uri.scheme_str(), Some("https") | Some("wss"));
        let port = authority.port_u16().unwrap_or(if secure { 443 } else { 80 });
        let host = authority.host().trim_start_matches('[').trim_end_matches(']');
        if host.is_empty() {
            return Err(ProxyError::MissingHost);
        }

        let path = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .filter(|pq| !pq.is_empty())
            .unwrap_or("/");

        Ok(Self::new(host, port).with_path(path).with_secure(secure))
    }

    /// Name presented for SNI and certificate checks.
    pub fn server_name(&self) -> &str {
        self.servername.as_deref().unwrap_or(&self.host)
    }

    pub fn authority(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    Socks5,
    Socks4a,
    /// Plain requests forwarded to the proxy in absolute form.
    HttpProxy,
    /// Secure requests tunnelled through the proxy with `CONNECT`.
    HttpsProxy,
}

const DEFAULT_SOCKS_PORT: u16 = 1080;

/// What a connector factory needs to build the connector for one directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorSpec {
    pub kind: ConnectorKind,
    pub proxy_url: Url,
}

impl ConnectorSpec {
    pub fn new(kind: ConnectorKind, scheme: &str, address: &str) -> Result<Self> {
        let proxy_url = format!("{}://{}", scheme, address)
            .parse::<Url>()
            .map_err(|e| ProxyError::InvalidProxyAddress {
                address: address.to_string(),
                reason: e.to_string(),
            })?;

        if proxy_url.host_str().is_none() {
            return Err(ProxyError::InvalidProxyAddress {
                address: address.to_string(),
                reason: "missing host".into(),
            });
        }

        Ok(Self { kind, proxy_url })
    }

    /// Port of the proxy itself. SOCKS proxies default to 1080.
    pub fn proxy_port(&self) -> Option<u16> {
        self.proxy_url.port_or_known_default().or(match self.kind {
            ConnectorKind::Socks5 | ConnectorKind::Socks4a => Some(DEFAULT_SOCKS_PORT),
            ConnectorKind::HttpProxy | ConnectorKind::HttpsProxy => None,
        })
    }

    /// `host:port` of the proxy itself.
    pub fn proxy_addr(&self) -> String {
        let host = self.proxy_url.host_str().unwrap_or_default();
        match self.proxy_port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }
}

impl std::fmt::Display for ConnectorSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} via {}", self.kind, self.proxy_url)
    }
}
