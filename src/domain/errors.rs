use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Invalid URI: {0}")]
    InvalidUri(String),
    #[error("Missing host in request")]
    MissingHost,
    #[error("Unknown proxy type: {0}")]
    UnknownProxyType(String),
    #[error("Missing proxy address in directive: {0}")]
    MissingProxyAddress(String),
    #[error("Invalid proxy address {address}: {reason}")]
    InvalidProxyAddress { address: String, reason: String },
    #[error("Proxy resolution failed: {0}")]
    ResolutionFailed(String),
    #[error("Proxy resolution timed out")]
    ResolutionTimeout,
    #[error("Connection failed: {0}")]
    ConnectionFailed(#[from] std::io::Error),
    #[error("TLS error: {0}")]
    Tls(String),
    #[error("Connector error: {0}")]
    Connector(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ProxyError>;
