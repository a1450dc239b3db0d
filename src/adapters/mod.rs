pub mod direct;
pub mod hyper_client;
pub mod pac_resolver;

pub use direct::TokioDirectConnector;
pub use hyper_client::{HyperConnector, ProxyConnection};
pub use pac_resolver::*;

use std::sync::Arc;
use tracing::info;

use crate::config::AgentConfig;
use crate::domain::{Dispatcher, Result};
use crate::ports::ConnectorFactoryPort;

/// Dispatcher wired with the configured default resolver and the tokio
/// direct connector.
pub fn default_dispatcher(config: &AgentConfig, factory: Arc<dyn ConnectorFactoryPort>) -> Result<Dispatcher> {
    info!("pacdispatch {} building default dispatcher", crate::VERSION);
    let direct = Arc::new(TokioDirectConnector::new()?);
    Ok(Dispatcher::new(default_resolver(config), factory, direct).with_config(config))
}
