use std::fmt;
use std::str::FromStr;

use super::{ConnectorKind, ConnectorSpec, ProxyError, Result};

const DIRECT: &str = "DIRECT";

/// Proxy protocols a directive can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyKind {
    Proxy,
    Http,
    Https,
    Socks,
    Socks4,
    Socks5,
}

impl ProxyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyKind::Proxy => "PROXY",
            ProxyKind::Http => "HTTP",
            ProxyKind::Https => "HTTPS",
            ProxyKind::Socks => "SOCKS",
            ProxyKind::Socks4 => "SOCKS4",
            ProxyKind::Socks5 => "SOCKS5",
        }
    }

    /// Picks the connector for this kind of proxy at `address`.
    ///
    /// HTTP-family proxies are reached over TLS only for `HTTPS`; whether the
    /// request is forwarded or tunnelled depends on the request itself, so a
    /// plain `PROXY` directive can still carry a secure request.
    pub fn connector_spec(&self, address: &str, secure: bool) -> Result<ConnectorSpec> {
        match self {
            ProxyKind::Socks | ProxyKind::Socks5 => ConnectorSpec::new(ConnectorKind::Socks5, "socks", address),
            ProxyKind::Socks4 => ConnectorSpec::new(ConnectorKind::Socks4a, "socks4a", address),
            ProxyKind::Proxy | ProxyKind::Http | ProxyKind::Https => {
                let scheme = if *self == ProxyKind::Https { "https" } else { "http" };
                let kind = if secure {
                    ConnectorKind::HttpsProxy
                } else {
                    ConnectorKind::HttpProxy
                };
                ConnectorSpec::new(kind, scheme, address)
            }
        }
    }
}

impl FromStr for ProxyKind {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PROXY" => Ok(ProxyKind::Proxy),
            "HTTP" => Ok(ProxyKind::Http),
            "HTTPS" => Ok(ProxyKind::Https),
            "SOCKS" => Ok(ProxyKind::Socks),
            "SOCKS4" => Ok(ProxyKind::Socks4),
            "SOCKS5" => Ok(ProxyKind::Socks5),
            other => Err(ProxyError::UnknownProxyType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyRoute {
    Direct,
    Upstream { kind: ProxyKind, address: String },
}

impl fmt::Display for ProxyRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyRoute::Direct => write!(f, "direct"),
            ProxyRoute::Upstream { kind, address } => write!(f, "{} {}", kind.as_str(), address),
        }
    }
}

/// One entry of a resolver answer, e.g. `PROXY proxy.example:8080`.
///
/// `raw` is kept verbatim: it is the key connectors are cached under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub raw: String,
    pub route: ProxyRoute,
}

impl Directive {
    pub fn direct() -> Self {
        Self {
            raw: DIRECT.to_string(),
            route: ProxyRoute::Direct,
        }
    }

    pub fn is_direct(&self) -> bool {
        self.route == ProxyRoute::Direct
    }
}

impl FromStr for Directive {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self> {
        let raw = s.trim();
        let mut parts = raw.split_whitespace();

        let route = match parts.next() {
            None | Some(DIRECT) => ProxyRoute::Direct,
            Some(token) => {
                let kind: ProxyKind = token.parse()?;
                let address = parts
                    .next()
                    .ok_or_else(|| ProxyError::MissingProxyAddress(raw.to_string()))?;
                ProxyRoute::Upstream {
                    kind,
                    address: address.to_string(),
                }
            }
        };

        Ok(Self {
            raw: raw.to_string(),
            route,
        })
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Splits a resolver answer into its non-empty candidates, in order.
///
/// A missing or blank answer means `DIRECT`.
pub fn split_candidates(answer: Option<&str>) -> Vec<&str> {
    let candidates: Vec<&str> = answer
        .unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .collect();

    if candidates.is_empty() {
        vec![DIRECT]
    } else {
        candidates
    }
}

/// Parses the first candidate of a resolver answer. Later candidates are
/// never looked at, there is no failover.
pub fn select_directive(answer: Option<&str>) -> Result<Directive> {
    split_candidates(answer)
        .first()
        .copied()
        .unwrap_or(DIRECT)
        .parse()
}
